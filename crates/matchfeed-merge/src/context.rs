//! Reconciliation context

use matchfeed_model::{FeedRequestContext, LegacyFeed, MatchRecord};

/// One request's inputs to reconciliation
///
/// Owns the legacy feed it refines; one context per logical request.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchFeedContext {
    request: FeedRequestContext,
    legacy_feed: LegacyFeed,
    store_feed: Vec<MatchRecord>,
}

impl MatchFeedContext {
    /// Create context from a request, its resolved legacy feed and the primary-store records
    #[inline]
    #[must_use]
    pub fn new(
        request: FeedRequestContext,
        legacy_feed: LegacyFeed,
        store_feed: Vec<MatchRecord>,
    ) -> Self {
        Self {
            request,
            legacy_feed,
            store_feed,
        }
    }

    /// Request being served
    #[inline]
    #[must_use]
    pub fn request(&self) -> &FeedRequestContext {
        &self.request
    }

    /// Legacy feed in its current state
    #[inline]
    #[must_use]
    pub fn legacy_feed(&self) -> &LegacyFeed {
        &self.legacy_feed
    }

    /// Primary-store records
    #[inline]
    #[must_use]
    pub fn store_feed(&self) -> &[MatchRecord] {
        &self.store_feed
    }

    /// Split borrow: records to read, legacy feed to refine
    #[inline]
    pub fn parts_mut(&mut self) -> (&FeedRequestContext, &[MatchRecord], &mut LegacyFeed) {
        (&self.request, &self.store_feed, &mut self.legacy_feed)
    }

    /// Take the (possibly refined) legacy feed
    #[inline]
    #[must_use]
    pub fn into_legacy_feed(self) -> LegacyFeed {
        self.legacy_feed
    }
}
