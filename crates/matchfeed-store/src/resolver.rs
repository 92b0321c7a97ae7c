//! Query parameter resolution
//!
//! Translates a [`FeedRequestContext`] into the primary store's native
//! [`MatchDataFeedQuery`]: field projection, status filters, limit and sort.

use crate::limits::FeedLimits;
use crate::query::{MatchDataFeedQuery, Paging, DEFAULT_SORT_BY_FIELD};
use matchfeed_model::{FeedRequestContext, MatchStatusGroup};
use std::sync::Arc;

/// Builds store queries from feed requests
#[derive(Debug, Clone)]
pub struct QueryParamResolver {
    profile_fields: Arc<[String]>,
    limits: Arc<dyn FeedLimits>,
}

impl QueryParamResolver {
    /// Create resolver over the configured profile projection and limits
    #[must_use]
    pub fn new(profile_fields: impl Into<Arc<[String]>>, limits: Arc<dyn FeedLimits>) -> Self {
        Self {
            profile_fields: profile_fields.into(),
            limits,
        }
    }

    /// Build the store query for a request
    #[must_use]
    pub fn resolve(&self, request: &FeedRequestContext) -> MatchDataFeedQuery {
        let mut query = MatchDataFeedQuery::new(request.user_id);

        if request
            .strategy
            .is_some_and(|s| s.uses_profile_projection())
        {
            query.selected_fields = Some(self.profile_fields.to_vec());
        }

        // Limits are only resolved for status-filtered requests.
        if !request.statuses.is_empty() {
            query.status_filters = request.statuses.iter().map(|s| s.to_int()).collect();
            query.paging = self.resolve_limit(request).map(Paging::limit);
        }

        query.sort_by = resolve_sort_by(request.status_group);

        tracing::debug!(
            user_id = request.user_id,
            status_filters = ?query.status_filters,
            limit = ?query.limit(),
            sort_by = query.sort_by,
            "resolved primary store query"
        );
        query
    }

    /// Positive record limit for a request, if one can be determined
    ///
    /// `page_size * max(page_number, 1)` when a page size was supplied,
    /// otherwise the configured limit for the request's status group.
    #[must_use]
    pub fn resolve_limit(&self, request: &FeedRequestContext) -> Option<u32> {
        let requested = if request.page_size > 0 {
            request
                .page_size
                .checked_mul(request.page_number.max(1))
                .filter(|limit| *limit > 0)
        } else {
            None
        };

        requested
            .or_else(|| {
                if request.fallback_request {
                    self.limits.fallback_limit(request.status_group)
                } else {
                    self.limits.default_limit(request.status_group)
                }
            })
            .filter(|limit| *limit > 0)
    }
}

/// Sort field for a status group
///
/// Communication would sort by [`COMM_SORT_BY_FIELD`](crate::COMM_SORT_BY_FIELD),
/// but the legacy feed does not order by last communication, so every group
/// sorts by delivery date until both feeds agree.
#[must_use]
#[allow(clippy::match_same_arms)]
fn resolve_sort_by(group: Option<MatchStatusGroup>) -> &'static str {
    match group {
        // TODO: return COMM_SORT_BY_FIELD once the legacy feed is retired.
        Some(MatchStatusGroup::Communication) => DEFAULT_SORT_BY_FIELD,
        Some(_) | None => DEFAULT_SORT_BY_FIELD,
    }
}
