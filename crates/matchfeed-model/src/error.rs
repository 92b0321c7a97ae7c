//! Error types for the matches feed
//!
//! Failures never escape the retrieval layer as `Err`; they are captured on a
//! [`FeedResponse`](crate::FeedResponse) and surfaced through
//! [`Outcome::Degraded`](crate::Outcome::Degraded).

/// Failure raised by the primary-store repository
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Store rejected or failed the query
    #[error("query failed: {0}")]
    Query(String),

    /// Store did not answer in time
    #[error("store query timed out after {elapsed_ms}ms")]
    Timeout {
        /// Time waited before giving up
        elapsed_ms: u64,
    },

    /// Unclassified failure, including a panic while resolving or running the query
    #[error("unexpected store failure: {0}")]
    Unexpected(String),
}

/// Failure captured while producing a feed response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// Primary-store query failed
    #[error("store query failed: {0}")]
    Store(#[from] StoreError),

    /// Failure outside the guarded store call
    #[error("feed pipeline failed: {0}")]
    Pipeline(String),
}

impl FeedError {
    /// Check if failure came from the store query
    #[inline]
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Check if failure happened outside the store query
    #[inline]
    #[must_use]
    pub fn is_pipeline_failure(&self) -> bool {
        matches!(self, Self::Pipeline(_))
    }

    /// Build a pipeline error from a panic payload
    #[must_use]
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        Self::Pipeline(panic_message(payload))
    }
}

/// Best-effort text of a panic payload
#[must_use]
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl StoreError {
    /// Build an unexpected-failure error from a panic payload
    #[must_use]
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        Self::Unexpected(panic_message(payload))
    }
}
