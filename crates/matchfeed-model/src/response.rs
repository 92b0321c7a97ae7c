//! Per-store query outcome and the tagged result callers branch on

use crate::error::FeedError;
use crate::record::MatchRecord;
use crate::status::MatchStatusGroup;

/// Result of one primary-store query attempt
///
/// Constructed fresh per call. A failure is captured in
/// [`FeedResponse::error`] instead of being returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    status_group: Option<MatchStatusGroup>,
    items: Vec<MatchRecord>,
    data_available: bool,
    error: Option<FeedError>,
}

impl FeedResponse {
    /// Create empty response for a status group
    #[inline]
    #[must_use]
    pub fn new(status_group: Option<MatchStatusGroup>) -> Self {
        Self {
            status_group,
            items: Vec::new(),
            data_available: false,
            error: None,
        }
    }

    /// Create empty response carrying a failure
    #[inline]
    #[must_use]
    pub fn failed(status_group: Option<MatchStatusGroup>, error: FeedError) -> Self {
        let mut response = Self::new(status_group);
        response.error = Some(error);
        response
    }

    /// Store the retrieved records; data is available iff non-empty
    pub fn set_items(&mut self, items: Vec<MatchRecord>) {
        self.data_available = !items.is_empty();
        self.items = items;
    }

    /// Capture a failure
    #[inline]
    pub fn set_error(&mut self, error: FeedError) {
        self.error = Some(error);
    }

    /// Status group this response answers for
    #[inline]
    #[must_use]
    pub fn status_group(&self) -> Option<MatchStatusGroup> {
        self.status_group
    }

    /// Retrieved records
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[MatchRecord] {
        &self.items
    }

    /// Take ownership of the retrieved records
    #[inline]
    #[must_use]
    pub fn into_items(self) -> Vec<MatchRecord> {
        self.items
    }

    /// Whether the store returned at least one record
    #[inline]
    #[must_use]
    pub fn is_data_available(&self) -> bool {
        self.data_available
    }

    /// Captured failure, if any
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&FeedError> {
        self.error.as_ref()
    }

    /// Move the captured failure into the [`Outcome`] tag
    #[must_use]
    pub fn into_outcome(mut self) -> Outcome<FeedResponse> {
        match self.error.take() {
            Some(cause) => Outcome::Degraded(self, cause),
            None => Outcome::Ok(self),
        }
    }
}

/// Tagged result: a full answer, or a usable answer plus the failure that degraded it
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Every source answered
    Ok(T),
    /// A source failed; the value is still usable
    Degraded(T, FeedError),
}

impl<T> Outcome<T> {
    /// Borrow the value regardless of tag
    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Ok(value) | Self::Degraded(value, _) => value,
        }
    }

    /// Take the value regardless of tag
    #[inline]
    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Ok(value) | Self::Degraded(value, _) => value,
        }
    }

    /// Failure that degraded this outcome
    #[inline]
    #[must_use]
    pub fn cause(&self) -> Option<&FeedError> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded(_, cause) => Some(cause),
        }
    }

    /// Check if degraded
    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(..))
    }

    /// Map the value, keeping the tag
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Degraded(value, cause) => Outcome::Degraded(f(value), cause),
        }
    }
}
