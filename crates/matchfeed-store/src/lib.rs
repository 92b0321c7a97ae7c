//! Matches Feed Store Access
//!
//! Everything between a [`FeedRequestContext`](matchfeed_model::FeedRequestContext)
//! and the primary store:
//!
//! - [`QueryParamResolver`]: translates a request into a [`MatchDataFeedQuery`]
//! - [`MatchStoreQueryRepository`]: port to the primary store
//! - [`FeedRetriever`]: one timed, fault-isolated query attempt per call
//! - [`Clock`] / [`TimerSink`]: timing ports, backed by the `metrics` crate in production
//!
//! # Example
//!
//! ```rust,ignore
//! use matchfeed_store::{FeedRetriever, QueryParamResolver};
//!
//! let resolver = QueryParamResolver::new(profile_fields, limits);
//! let retriever = FeedRetriever::new(repository, resolver);
//!
//! // Never fails; a store failure comes back as Outcome::Degraded
//! let outcome = retriever.fetch_safe(&request).await;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod limits;
mod query;
mod repository;
mod resolver;
mod retriever;
mod timing;

pub use limits::{FeedLimits, FeedLimitsConfig, GroupLimits};
pub use query::{MatchDataFeedQuery, Paging, COMM_SORT_BY_FIELD, DEFAULT_SORT_BY_FIELD, START_PAGE};
pub use repository::MatchStoreQueryRepository;
pub use resolver::QueryParamResolver;
pub use retriever::{FeedRetriever, TIMER_PREFIX};
pub use timing::{timer_name, Clock, MetricsTimerSink, SystemClock, TimerSink};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
