/// Core error type for the TamTam client.
///
/// Adapter crates map their transport errors into this type so callers see a
/// single failure channel for every API call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("api error: {status} {body}")]
    Api { status: u16, body: String },

    #[error("invalid update: {0}")]
    InvalidUpdate(String),
}

impl Error {
    /// HTTP status for server-side rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
