//! Matches Feed Core
//!
//! Retrieves a user's matches from the primary store and reconciles them
//! with the legacy feed, so callers always receive a feed:
//! - Translates feed requests into primary-store queries
//! - Runs one timed, fault-isolated query attempt per request
//! - Refines the legacy feed with primary-store profile data
//! - Degrades to the legacy feed, tagged with the cause, when the store fails
//!
//! # Example
//!
//! ```rust,ignore
//! use matchfeed_core::{MatchFeedConfig, MatchFeedService};
//! use matchfeed_model::{FeedRequestContext, MatchStatusGroup, Outcome};
//!
//! # async fn example(repository: std::sync::Arc<dyn matchfeed_store::MatchStoreQueryRepository>,
//! #                  legacy_feed: matchfeed_model::LegacyFeed) {
//! let config = MatchFeedConfig::from_toml_str("[limits.groups.new]\ndefault = 20\n").unwrap();
//! let service = MatchFeedService::new(&config, repository);
//!
//! let request = FeedRequestContext::for_group(42, MatchStatusGroup::New).with_paging(1, 20);
//! match service.get_feed(request, legacy_feed).await {
//!     Outcome::Ok(feed) => println!("{} matches", feed.len()),
//!     Outcome::Degraded(feed, cause) => println!("{} legacy matches ({cause})", feed.len()),
//! }
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::{MatchFeedConfig, DEFAULT_PROFILE_FIELDS};
pub use error::ConfigError;
pub use service::MatchFeedService;
pub use telemetry::{init_tracing, LogFormat};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for serving matches feeds
    pub use crate::{MatchFeedConfig, MatchFeedService};
    pub use matchfeed_merge::{FeedMergeStrategy, MergeDecision, MergeStrategyRegistry};
    pub use matchfeed_model::{
        FeedError, FeedRequestContext, LegacyFeed, MatchRecord, MatchStatus, MatchStatusGroup,
        MergeStrategyKind, Outcome,
    };
    pub use matchfeed_store::{FeedRetriever, MatchStoreQueryRepository, QueryParamResolver};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
