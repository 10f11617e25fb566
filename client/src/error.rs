use thiserror::Error;

/// Shown when a watchlist refresh is attempted with no symbols.
pub const EMPTY_WATCHLIST_MESSAGE: &str = "Add at least one ticker to continue.";

/// Shown for every non-2xx answer, whatever the status code or body.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch moving averages.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP transport error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Moving averages service answered with status {0}")]
    Status(u16),

    #[error("Invalid response body: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    #[error("Add at least one ticker to continue.")]
    EmptyWatchlist,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Text surfaced to the user once the error reaches the dashboard.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::EmptyWatchlist => {
                tracing::debug!("Refresh refused: empty watchlist");
                EMPTY_WATCHLIST_MESSAGE.to_string()
            }
            ClientError::Status(_) => {
                tracing::error!("Mapping ClientError to user message: {:?}", self);
                FETCH_FAILED_MESSAGE.to_string()
            }
            // Transport failures read as the failure itself.
            ClientError::Http { source } => {
                tracing::error!("Mapping ClientError to user message: {:?}", self);
                source.to_string()
            }
            other => {
                tracing::error!("Mapping ClientError to user message: {:?}", other);
                other.to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
