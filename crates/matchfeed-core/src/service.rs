//! Matches feed service
//!
//! The request flow end to end:
//! 1. Resolve the request into a store query and fetch it under a fault boundary
//! 2. Hand the retrieved records and the legacy feed to the selected merge strategy
//! 3. Return the legacy feed, tagged degraded if the primary store failed

use crate::config::MatchFeedConfig;
use matchfeed_merge::{MatchFeedContext, MergeDecision, MergeStrategyRegistry};
use matchfeed_model::{EventSink, FeedRequestContext, LegacyFeed, Outcome, TracingEventSink};
use matchfeed_store::{FeedRetriever, MatchStoreQueryRepository, QueryParamResolver};
use std::sync::Arc;

/// Serves reconciled matches feeds
#[derive(Debug, Clone)]
pub struct MatchFeedService {
    retriever: FeedRetriever,
    strategies: MergeStrategyRegistry,
}

impl MatchFeedService {
    /// Create service from configuration and a primary-store repository
    ///
    /// Diagnostics go to `tracing`, timers to `metrics`.
    #[must_use]
    pub fn new(config: &MatchFeedConfig, repository: Arc<dyn MatchStoreQueryRepository>) -> Self {
        Self::with_events(config, repository, Arc::new(TracingEventSink))
    }

    /// Create service reporting diagnostics to `events`
    #[must_use]
    pub fn with_events(
        config: &MatchFeedConfig,
        repository: Arc<dyn MatchStoreQueryRepository>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let resolver = QueryParamResolver::new(
            config.profile_fields.clone(),
            Arc::new(config.limits.clone()),
        );
        let retriever = FeedRetriever::new(repository, resolver).with_events(events.clone());
        Self {
            retriever,
            strategies: MergeStrategyRegistry::with_events(events),
        }
    }

    /// Create service from prepared parts
    #[inline]
    #[must_use]
    pub fn from_parts(retriever: FeedRetriever, strategies: MergeStrategyRegistry) -> Self {
        Self {
            retriever,
            strategies,
        }
    }

    /// Retriever in use
    #[inline]
    #[must_use]
    pub fn retriever(&self) -> &FeedRetriever {
        &self.retriever
    }

    /// Serve a feed
    ///
    /// `legacy_feed` is the already-resolved legacy feed for this request; it
    /// is refined in place and always returned. A primary-store failure
    /// degrades the outcome instead of failing the request.
    pub async fn get_feed(
        &self,
        request: FeedRequestContext,
        legacy_feed: LegacyFeed,
    ) -> Outcome<LegacyFeed> {
        self.reconcile(request, legacy_feed)
            .await
            .map(|(feed, _)| feed)
    }

    /// Serve a feed and report which reconciliation branch ran
    pub async fn reconcile(
        &self,
        request: FeedRequestContext,
        legacy_feed: LegacyFeed,
    ) -> Outcome<(LegacyFeed, MergeDecision)> {
        let fetched = self.retriever.fetch_safe(&request).await;
        let strategy = self.strategies.select(request.strategy);

        let user_id = request.user_id;
        fetched.map(|response| {
            let mut context = MatchFeedContext::new(request, legacy_feed, response.into_items());
            let decision = strategy.merge(&mut context);
            tracing::debug!(
                user_id,
                strategy = strategy.name(),
                decision = ?decision,
                "feed reconciled"
            );
            (context.into_legacy_feed(), decision)
        })
    }
}
