//! Core of the TamTam Bot API client.
//!
//! Request building, query assembly and update dispatch live here. The HTTP
//! layer sits behind the [`transport::Transport`] port and is implemented in
//! adapter crates (`tamtam-http`).

pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod logging;
pub mod query;
pub mod request;
pub mod transport;
pub mod updates;

pub use client::TamTamBot;
pub use errors::{Error, Result};
