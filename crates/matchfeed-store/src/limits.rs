//! Feed limits by status group
//!
//! Read-only lookup of the default and fallback-path record limits for each
//! status group, loaded once at startup and shared across requests.

use matchfeed_model::MatchStatusGroup;
use serde::Deserialize;
use std::collections::HashMap;

/// Limit lookup used by the resolver
pub trait FeedLimits: Send + Sync + std::fmt::Debug {
    /// Limit for regular requests
    fn default_limit(&self, group: Option<MatchStatusGroup>) -> Option<u32>;

    /// Limit for fallback-path requests
    fn fallback_limit(&self, group: Option<MatchStatusGroup>) -> Option<u32>;
}

/// Limits for one status group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupLimits {
    /// Limit for regular requests
    #[serde(default)]
    pub default: Option<u32>,
    /// Limit for fallback-path requests
    #[serde(default)]
    pub fallback: Option<u32>,
}

impl GroupLimits {
    /// Create limits pair
    #[inline]
    #[must_use]
    pub fn new(default: u32, fallback: u32) -> Self {
        Self {
            default: Some(default),
            fallback: Some(fallback),
        }
    }
}

/// Configured limits, keyed by status group
///
/// ```toml
/// [groups.new]
/// default = 20
/// fallback = 50
///
/// [unspecified]
/// default = 100
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedLimitsConfig {
    /// Per-group limits
    #[serde(default)]
    pub groups: HashMap<MatchStatusGroup, GroupLimits>,
    /// Limits for requests without a status group
    #[serde(default)]
    pub unspecified: Option<GroupLimits>,
}

impl FeedLimitsConfig {
    /// Create empty configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With limits for a group
    #[inline]
    #[must_use]
    pub fn with_group(mut self, group: MatchStatusGroup, limits: GroupLimits) -> Self {
        self.groups.insert(group, limits);
        self
    }

    /// With limits for requests without a group
    #[inline]
    #[must_use]
    pub fn with_unspecified(mut self, limits: GroupLimits) -> Self {
        self.unspecified = Some(limits);
        self
    }

    fn lookup(&self, group: Option<MatchStatusGroup>) -> Option<&GroupLimits> {
        match group {
            Some(group) => self.groups.get(&group),
            None => self.unspecified.as_ref(),
        }
    }
}

impl FeedLimits for FeedLimitsConfig {
    fn default_limit(&self, group: Option<MatchStatusGroup>) -> Option<u32> {
        self.lookup(group).and_then(|l| l.default)
    }

    fn fallback_limit(&self, group: Option<MatchStatusGroup>) -> Option<u32> {
        self.lookup(group).and_then(|l| l.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_group() {
        let limits = FeedLimitsConfig::new()
            .with_group(MatchStatusGroup::New, GroupLimits::new(20, 50))
            .with_unspecified(GroupLimits {
                default: Some(100),
                fallback: None,
            });

        assert_eq!(limits.default_limit(Some(MatchStatusGroup::New)), Some(20));
        assert_eq!(limits.fallback_limit(Some(MatchStatusGroup::New)), Some(50));
        assert_eq!(limits.default_limit(Some(MatchStatusGroup::Archive)), None);
        assert_eq!(limits.default_limit(None), Some(100));
        assert_eq!(limits.fallback_limit(None), None);
    }
}
