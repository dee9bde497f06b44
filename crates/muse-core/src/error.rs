//! Domain-level error types.

use thiserror::Error;

/// Failures talking to the upstream movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Upstream request failed: {0}")]
    Request(String),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream responded with status {status}")]
    Status { status: u16 },

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}
