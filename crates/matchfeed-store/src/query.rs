//! Primary-store query descriptor

/// Sort field used for every status group
pub const DEFAULT_SORT_BY_FIELD: &str = "deliveredDate";

/// Last-communication sort field; not selected today, see [`crate::QueryParamResolver`]
pub const COMM_SORT_BY_FIELD: &str = "lastCommDate";

/// Starting page sent with every bounded query
///
/// The primary store only truncates by limit; it has no offset paging.
pub const START_PAGE: u32 = 1;

/// Limit-based paging sent to the primary store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// Always [`START_PAGE`]
    pub start_page: u32,
    /// Maximum number of records
    pub page_size: u32,
}

impl Paging {
    /// Truncate the result at `limit` records
    #[inline]
    #[must_use]
    pub fn limit(limit: u32) -> Self {
        Self {
            start_page: START_PAGE,
            page_size: limit,
        }
    }
}

/// Native query parameters for the primary store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDataFeedQuery {
    /// Owner of the feed
    pub user_id: i64,
    /// Field projection; `None` requests full records
    pub selected_fields: Option<Vec<String>>,
    /// Status codes to filter on; empty means no filter
    pub status_filters: Vec<i32>,
    /// Paging; `None` leaves the store's default (unbounded)
    pub paging: Option<Paging>,
    /// Sort field
    pub sort_by: &'static str,
}

impl MatchDataFeedQuery {
    /// Create unfiltered, unbounded query for a user
    #[inline]
    #[must_use]
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            selected_fields: None,
            status_filters: Vec::new(),
            paging: None,
            sort_by: DEFAULT_SORT_BY_FIELD,
        }
    }

    /// Effective record limit, if bounded
    #[inline]
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        self.paging.map(|p| p.page_size)
    }
}
