use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache lock was poisoned")]
    Poisoned,
}

/// Failures of the remote service or the wire. These are handed to the caller untouched.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("not authorized (HTTP {status}), check the session id")]
    Unauthorized { status: u16 },
    #[error("rate limited, retry in {}s", .0.as_secs())]
    RateLimited(Duration),
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },
    #[error("no session established, authenticate first")]
    NoSession,
    #[error("{resource} is not cached and the transport is offline")]
    Offline { resource: String },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Encode(#[from] serde_urlencoded::ser::Error),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(
        "malformed response while {context}: details were logged, please open a ticket with the log contents"
    )]
    MalformedResponse {
        context: String,
        #[source]
        source: Option<serde_json::Error>,
    },
    #[error("service returned error {code}: {message}")]
    Api { code: i64, message: String },
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl ModelError {
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, ModelError::MalformedResponse { .. })
    }
}
