use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Origin for every Bot API call. Not configurable.
pub const BASE_API_URL: &str = "https://botapi.tamtam.chat";

/// Bot API protocol version sent as `v` on every request.
pub const DEFAULT_API_VERSION: &str = "0.1.6";

/// Typed client configuration.
///
/// Read-only after construction; the client shares it behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Config {
    pub token: String,
    pub api_version: String,
    pub base_url: String,

    /// Per-request timeout for the HTTP adapter. `None` keeps the HTTP
    /// client's own default.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: BASE_API_URL.to_string(),
            request_timeout: None,
        }
    }

    /// Load from the process environment (and `.env` if present).
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(env_str)
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("TAMTAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TAMTAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let api_version = lookup("TAMTAM_API_VERSION")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        let request_timeout = match lookup("TAMTAM_REQUEST_TIMEOUT_MS") {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!("TAMTAM_REQUEST_TIMEOUT_MS is not a number: {raw}"))
                })?;
                Some(Duration::from_millis(ms))
            }
            None => None,
        };

        Ok(Self {
            token,
            api_version,
            base_url: BASE_API_URL.to_string(),
            request_timeout,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
