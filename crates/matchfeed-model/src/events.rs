//! Structured diagnostics port
//!
//! Retrieval and reconciliation report what they observed as [`FeedEvent`]s
//! through an injected [`EventSink`]. Production wiring uses
//! [`TracingEventSink`]; tests record events instead.

use crate::error::FeedError;
use crate::status::MatchStatusGroup;
use std::fmt;
use std::time::Duration;
use tracing::Level;

/// Profile field reported as missing in a primary-store record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    /// Gender code
    Gender,
    /// Country code
    Country,
    /// City
    City,
    /// First name
    FirstName,
    /// Birthdate
    Birthdate,
}

impl ProfileField {
    /// Field name as used in the legacy profile section
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ProfileField::Gender => "gender",
            ProfileField::Country => "country",
            ProfileField::City => "city",
            ProfileField::FirstName => "firstName",
            ProfileField::Birthdate => "birthdate",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Observable condition while serving a feed
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Store query failed and was captured on the response
    QueryFailed {
        /// Owner of the feed
        user_id: i64,
        /// Requested status group
        status_group: Option<MatchStatusGroup>,
        /// Captured failure
        error: FeedError,
    },
    /// Wall-clock duration of one store query attempt
    ResponseTime {
        /// Owner of the feed
        user_id: i64,
        /// Requested status group
        status_group: Option<MatchStatusGroup>,
        /// Time from attempt start to result
        elapsed: Duration,
    },
    /// Failure outside the guarded query; an empty response was substituted
    SafeFallback {
        /// Owner of the feed
        user_id: i64,
        /// Requested status group
        status_group: Option<MatchStatusGroup>,
        /// Failure that was contained
        error: FeedError,
    },
    /// Reconciliation started
    MergeStarted {
        /// Owner of the feed
        user_id: i64,
    },
    /// Neither source has matches
    BothSourcesEmpty {
        /// Owner of the feed
        user_id: i64,
    },
    /// Legacy has matches, primary store has none
    LegacyOnly {
        /// Owner of the feed
        user_id: i64,
        /// Entries in the legacy feed
        legacy_matches: usize,
    },
    /// Primary store has matches, legacy has none; nothing is merged
    PrimaryOnly {
        /// Owner of the feed
        user_id: i64,
        /// Records returned by the primary store
        store_matches: usize,
    },
    /// Primary-store match unknown to legacy; legacy stays authoritative
    MatchNotInLegacy {
        /// Legacy key of the skipped record
        match_id: String,
        /// Owner of the match
        user_id: i64,
    },
    /// Primary-store profile field missing; legacy value kept
    FieldMissing {
        /// Field left at its legacy value
        field: ProfileField,
        /// Matched user the profile belongs to
        matched_user_id: i64,
        /// Legacy key of the match
        match_id: String,
    },
}

impl FeedEvent {
    /// Severity this event is logged at
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Self::QueryFailed { .. } | Self::SafeFallback { .. } | Self::LegacyOnly { .. } => {
                Level::WARN
            }
            Self::PrimaryOnly { .. } => Level::ERROR,
            Self::ResponseTime { .. }
            | Self::MergeStarted { .. }
            | Self::BothSourcesEmpty { .. }
            | Self::MatchNotInLegacy { .. }
            | Self::FieldMissing { .. } => Level::INFO,
        }
    }
}

/// Sink for [`FeedEvent`]s
pub trait EventSink: Send + Sync + fmt::Debug {
    /// Record one event; must not fail
    fn emit(&self, event: FeedEvent);
}

/// Emits events as `tracing` records
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: FeedEvent) {
        match event {
            FeedEvent::QueryFailed {
                user_id,
                status_group,
                error,
            } => tracing::warn!(
                user_id,
                status_group = group_name(status_group),
                %error,
                "exception while fetching matches from primary store"
            ),
            FeedEvent::ResponseTime {
                user_id,
                status_group,
                elapsed,
            } => tracing::info!(
                user_id,
                status_group = group_name(status_group),
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "primary store response time"
            ),
            FeedEvent::SafeFallback {
                user_id,
                status_group,
                error,
            } => tracing::warn!(
                user_id,
                status_group = group_name(status_group),
                %error,
                "feed retrieval failed, returning empty feed from safe path"
            ),
            FeedEvent::MergeStarted { user_id } => {
                tracing::info!(user_id, "merging feed");
            }
            FeedEvent::BothSourcesEmpty { user_id } => {
                tracing::info!(user_id, "no matches found in either primary store or legacy feed");
            }
            FeedEvent::LegacyOnly {
                user_id,
                legacy_matches,
            } => tracing::warn!(
                user_id,
                legacy_matches,
                "no matches in primary store but legacy feed has matches"
            ),
            FeedEvent::PrimaryOnly {
                user_id,
                store_matches,
            } => tracing::error!(
                user_id,
                store_matches,
                "primary store has matches but legacy feed is empty; this path should not occur"
            ),
            FeedEvent::MatchNotInLegacy { match_id, user_id } => tracing::info!(
                match_id = %match_id,
                user_id,
                "primary store match not found in legacy feed, keeping legacy as source of truth"
            ),
            FeedEvent::FieldMissing {
                field,
                matched_user_id,
                match_id,
            } => tracing::info!(
                field = field.name(),
                matched_user_id,
                match_id = %match_id,
                "profile field missing in primary store"
            ),
        }
    }
}

/// Group name for log fields, `NONE` when unspecified
fn group_name(group: Option<MatchStatusGroup>) -> &'static str {
    group.map_or("NONE", MatchStatusGroup::name)
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: FeedEvent) {}
}
