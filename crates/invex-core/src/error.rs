//! Error types for the invex-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// The inference endpoint could not be reached or answered badly.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The input image does not exist.
    #[error("Image file not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while talking to the inference endpoint.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection refused, timeout, or any other request-level failure.
    #[error("request to inference endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("inference endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The endpoint answered 2xx but reported a failure in the body.
    #[error("inference endpoint reported an error: {0}")]
    Endpoint(String),

    /// The response body could not be decoded.
    #[error("failed to decode endpoint response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Legacy in-band rendering of the failure, as persisted in `result`.
    pub fn to_sentinel(&self) -> String {
        format!("Error: {self}")
    }
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
