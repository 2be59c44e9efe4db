use thiserror::Error;

/// The address datastore could not be opened or read. Fatal for the run.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("datastore path does not exist: {0}")]
    Missing(String),

    #[error("cannot access datastore path {path}: {source}")]
    Inaccessible {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("datastore path is not a regular file: {0}")]
    NotAFile(String),

    #[error("invalid SQL identifier for {kind}: {name:?}")]
    BadIdentifier { kind: &'static str, name: String },

    #[error("datastore unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
#[error("invalid target URL {url:?}: {reason}")]
pub struct InvalidTargetUrl {
    pub url: String,
    pub reason: &'static str,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} selector {selector:?}")]
    Selector { name: &'static str, selector: String },

    #[error("--delay must be a finite, non-negative number of seconds (got {0})")]
    Delay(f64),

    #[error("--timeout must be a finite, positive number of seconds (got {0})")]
    Timeout(f64),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single search request did not produce a usable body.
///
/// These never abort a run; the orchestrator logs them and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::HttpStatus(_) => "http_status",
        }
    }
}
