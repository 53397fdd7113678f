//! Client-side error type.

use thiserror::Error;

/// A failed client operation. Never fatal: callers surface these as
/// transient feedback and leave existing state on screen.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response body not read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded {status}: {body}")]
    Status {
        status: u16,
        /// The response body, typically the API's `{message, error}` JSON.
        body: String,
    },

    /// Marker JSON could not be produced or parsed (export/import files,
    /// response bodies).
    #[error("invalid marker JSON: {0}")]
    Json(#[from] serde_json::Error),
}
