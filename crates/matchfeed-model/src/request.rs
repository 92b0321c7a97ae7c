//! Feed request context

use crate::status::{MatchStatus, MatchStatusGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How the primary-store feed is reconciled with the legacy feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategyKind {
    /// Legacy feed refined with primary-store profile fields
    ///
    /// Only the configured profile projection is requested from the store.
    LegacyWithProfileMerge,
    /// Full primary-store records, no projection
    FullRecord,
}

impl MergeStrategyKind {
    /// Whether the store query should be restricted to profile fields
    #[inline]
    #[must_use]
    pub fn uses_profile_projection(self) -> bool {
        matches!(self, Self::LegacyWithProfileMerge)
    }
}

/// Per-request value object
///
/// Owned by one logical request; never shared across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRequestContext {
    /// Owner of the feed
    pub user_id: i64,
    /// Requested status filters
    pub statuses: BTreeSet<MatchStatus>,
    /// Status group; `None` means unspecified
    pub status_group: Option<MatchStatusGroup>,
    /// Page number (1-based, 0 when not supplied)
    pub page_number: u32,
    /// Page size (0 when not supplied)
    pub page_size: u32,
    /// Merge strategy selector
    pub strategy: Option<MergeStrategyKind>,
    /// This request is itself the degraded path; no merge is attempted
    pub fallback_request: bool,
}

impl FeedRequestContext {
    /// Create request for a user with no filters
    #[inline]
    #[must_use]
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Request for every status in a group
    #[must_use]
    pub fn for_group(user_id: i64, group: MatchStatusGroup) -> Self {
        Self::new(user_id)
            .with_group(group)
            .with_statuses(group.statuses().iter().copied())
    }

    /// With status group
    #[inline]
    #[must_use]
    pub fn with_group(mut self, group: MatchStatusGroup) -> Self {
        self.status_group = Some(group);
        self
    }

    /// With status filters
    #[inline]
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = MatchStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// With paging
    #[inline]
    #[must_use]
    pub fn with_paging(mut self, page_number: u32, page_size: u32) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }

    /// With merge strategy
    #[inline]
    #[must_use]
    pub fn with_strategy(mut self, strategy: MergeStrategyKind) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Mark as fallback request
    #[inline]
    #[must_use]
    pub fn as_fallback(mut self) -> Self {
        self.fallback_request = true;
        self
    }

    /// Group name for logs, `NONE` when unspecified
    #[inline]
    #[must_use]
    pub fn group_label(&self) -> &'static str {
        self.status_group.map_or("NONE", MatchStatusGroup::name)
    }
}
