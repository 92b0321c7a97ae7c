//! Strategy registry for merge strategies
//!
//! Provides [`MergeStrategyRegistry`] for selecting the reconciliation
//! strategy a request asked for.

use crate::default::DefaultFeedMergeStrategy;
use crate::strategy::FeedMergeStrategy;
use matchfeed_model::{EventSink, MergeStrategyKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of merge strategies keyed by [`MergeStrategyKind`]
///
/// Requests without a strategy, or with a kind nothing is registered for,
/// get the fallback strategy.
#[derive(Debug, Clone)]
pub struct MergeStrategyRegistry {
    strategies: HashMap<MergeStrategyKind, Arc<dyn FeedMergeStrategy>>,
    fallback: Arc<dyn FeedMergeStrategy>,
}

impl MergeStrategyRegistry {
    /// Create registry with only a fallback strategy
    #[inline]
    #[must_use]
    pub fn new(fallback: Arc<dyn FeedMergeStrategy>) -> Self {
        Self {
            strategies: HashMap::new(),
            fallback,
        }
    }

    /// Create registry with built-in strategies
    ///
    /// Both kinds reconcile with [`DefaultFeedMergeStrategy`]; they differ
    /// only in the projection requested from the store.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::defaults_with(Arc::new(DefaultFeedMergeStrategy::new()))
    }

    /// Built-in strategies reporting to `events`
    #[must_use]
    pub fn with_events(events: Arc<dyn EventSink>) -> Self {
        Self::defaults_with(Arc::new(DefaultFeedMergeStrategy::new().with_events(events)))
    }

    fn defaults_with(strategy: Arc<DefaultFeedMergeStrategy>) -> Self {
        let mut registry = Self::new(strategy.clone());
        registry.register(MergeStrategyKind::LegacyWithProfileMerge, strategy.clone());
        registry.register(MergeStrategyKind::FullRecord, strategy);
        registry
    }

    /// Register a strategy for a kind, replacing any previous one
    pub fn register(&mut self, kind: MergeStrategyKind, strategy: Arc<dyn FeedMergeStrategy>) {
        self.strategies.insert(kind, strategy);
    }

    /// Check if a kind has a registered strategy
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: MergeStrategyKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// Strategy for a request's selector
    #[must_use]
    pub fn select(&self, kind: Option<MergeStrategyKind>) -> Arc<dyn FeedMergeStrategy> {
        kind.and_then(|k| self.strategies.get(&k))
            .unwrap_or(&self.fallback)
            .clone()
    }

    /// Get number of registered strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for MergeStrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
