use shared::error::ApiError;
use thiserror::Error;

/// Failures surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a usable response (DNS, connect, TLS,
    /// timeout).
    #[error("store transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status. The decoded error body
    /// is attached when the store sent one.
    #[error("store rejected the request ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
        body: Option<ApiError>,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode store response: {0}")]
    Decode(#[source] reqwest::Error),

    /// A get-one returned a row count other than exactly one.
    #[error("expected exactly one row for {table} id {id}, got {count}")]
    RowCount {
        table: String,
        id: String,
        count: usize,
    },
}

impl StoreError {
    /// True for failures worth retrying by the user (transport and 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Rejected { status, .. } => status.is_server_error(),
            Self::Decode(_) | Self::RowCount { .. } => false,
        }
    }
}
