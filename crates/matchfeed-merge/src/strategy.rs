//! Merge strategy trait and core types
//!
//! Provides the [`FeedMergeStrategy`] trait for pluggable reconciliation of
//! the primary-store feed into the legacy feed.

use crate::context::MatchFeedContext;

/// Reconciliation strategy
///
/// # Contract
/// `merge()` refines the context's legacy feed in place or leaves it alone.
/// It never fails, never builds a feed from scratch and never adds match
/// entries the legacy feed did not already have.
pub trait FeedMergeStrategy: Send + Sync + std::fmt::Debug {
    /// Reconcile the context's feeds
    fn merge(&self, context: &mut MatchFeedContext) -> MergeDecision;

    /// Strategy name (for debugging/logging)
    fn name(&self) -> &'static str;
}

/// Branch of the reconciliation policy that ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Fallback request; the legacy feed already is the primary-store data
    SkippedFallback,

    /// Neither source has matches
    BothEmpty,

    /// Primary store empty, legacy kept as is
    LegacyOnly,

    /// Legacy empty, primary store has matches; nothing merged
    PrimaryOnly,

    /// Records merged into existing legacy entries
    Merged {
        /// Legacy entries refined
        refined: usize,
        /// Primary-store records without a legacy entry
        skipped: usize,
    },
}

impl MergeDecision {
    /// Check if the legacy feed may have been changed
    #[inline]
    #[must_use]
    pub fn touched_legacy(&self) -> bool {
        matches!(self, Self::Merged { refined, .. } if *refined > 0)
    }
}
