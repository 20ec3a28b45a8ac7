use thiserror::Error;

/// The only failure kind the presentation layer ever distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConnectionOrParseFailure,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: TransportError,
    },
    #[error("malformed JSON from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ConnectionOrParseFailure
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            FetchError::Transport { endpoint, .. } | FetchError::Decode { endpoint, .. } => {
                *endpoint
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load client settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid backend url '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },
}
