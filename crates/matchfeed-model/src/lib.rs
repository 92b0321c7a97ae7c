//! Matches Feed Model
//!
//! Shared domain types for retrieving a user's matches feed from the primary
//! store and reconciling it against the legacy feed.
//!
//! # Core Concepts
//!
//! - [`MatchRecord`]: One candidate match as returned by the primary store
//! - [`LegacyFeed`]: The legacy feed document, keyed by match id
//! - [`FeedRequestContext`]: Per-request filters, paging and strategy
//! - [`FeedResponse`]: Per-store query outcome with failures captured as data
//! - [`Outcome`]: Tagged result distinguishing full from degraded answers
//! - [`EventSink`]: Port for the structured diagnostics emitted while serving a feed

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod events;
mod legacy;
mod record;
mod request;
mod response;
mod status;

pub use error::{FeedError, StoreError};
pub use events::{EventSink, FeedEvent, NoopEventSink, ProfileField, TracingEventSink};
pub use legacy::{LegacyFeed, LegacyMatch, ProfileOverlay, Section, PROFILE_SECTION};
pub use record::{MatchRecord, MatchedUserProfile};
pub use request::{FeedRequestContext, MergeStrategyKind};
pub use response::{FeedResponse, Outcome};
pub use status::{MatchStatus, MatchStatusGroup};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
