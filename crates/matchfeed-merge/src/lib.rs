//! Matches Feed Reconciliation
//!
//! Merges the primary-store record set into the legacy feed in place.
//!
//! # Core Concepts
//!
//! - [`FeedMergeStrategy`]: Core trait for reconciliation strategies
//! - [`DefaultFeedMergeStrategy`]: Legacy decides which matches exist; the
//!   primary store refines profile fields that it actually has
//! - [`MatchFeedContext`]: The request plus both feeds being reconciled
//! - [`MergeDecision`]: Which branch of the reconciliation policy ran
//! - [`MergeStrategyRegistry`]: Strategy selection by [`MergeStrategyKind`](matchfeed_model::MergeStrategyKind)
//!
//! # Example
//!
//! ```rust,ignore
//! use matchfeed_merge::{MatchFeedContext, MergeStrategyRegistry};
//!
//! let registry = MergeStrategyRegistry::with_defaults();
//! let mut context = MatchFeedContext::new(request, legacy_feed, records);
//!
//! let strategy = registry.select(context.request().strategy);
//! let decision = strategy.merge(&mut context);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod context;
mod default;
mod profile;
mod registry;
mod strategy;

pub use context::MatchFeedContext;
pub use default::DefaultFeedMergeStrategy;
pub use profile::overlay_profile;
pub use registry::MergeStrategyRegistry;
pub use strategy::{FeedMergeStrategy, MergeDecision};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
