//! Primary-store repository port

use crate::query::MatchDataFeedQuery;
use async_trait::async_trait;
use matchfeed_model::{MatchRecord, StoreError};

/// Query side of the primary (column-oriented) match store
///
/// One call is one attempt; retries are not this layer's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchStoreQueryRepository: Send + Sync {
    /// Fetch the records matching `query`
    ///
    /// # Errors
    /// Any [`StoreError`]; the caller captures it rather than propagating.
    async fn match_data_feed(
        &self,
        query: &MatchDataFeedQuery,
    ) -> Result<Vec<MatchRecord>, StoreError>;
}
