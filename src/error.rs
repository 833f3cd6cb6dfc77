//! Host failures: storage or browser API unavailability.
//!
//! Every variant means "feature unavailable". The controller logs and falls
//! back; nothing here is ever surfaced to the user.

/// Error returned by [`crate::host`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("no window object in this environment")]
    NoWindow,
    #[error("no document available")]
    NoDocument,
    /// `localStorage` is disabled or absent.
    #[error("durable storage is unavailable")]
    StorageUnavailable,
    /// A read or write threw (quota exceeded, security error).
    #[error("storage access failed: {0}")]
    Storage(String),
    /// `matchMedia` is missing or returned nothing for the query.
    #[error("media queries are not supported")]
    MediaQueryUnsupported,
    #[error("failed to subscribe to color-scheme changes: {0}")]
    Subscribe(String),
    #[error("failed to set attribute: {0}")]
    Attribute(String),
    #[error("failed to attach event listener: {0}")]
    Listener(String),
}

/// Result of a best-effort host operation.
pub type HostResult<T> = Result<T, HostError>;
