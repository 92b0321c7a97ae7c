//! Default merge strategy
//!
//! Legacy is the authoritative set of which matches exist. The primary store
//! may only refine the profile section of matches legacy already knows about.

use crate::context::MatchFeedContext;
use crate::profile::overlay_profile;
use crate::strategy::{FeedMergeStrategy, MergeDecision};
use matchfeed_model::{EventSink, FeedEvent, TracingEventSink};
use std::sync::Arc;

/// Profile-overlay merge strategy
///
/// # Policy (evaluated in order)
/// 1. Fallback request: no-op
/// 2. Primary store empty: no-op, logged as info (both empty) or warn (legacy only)
/// 3. Both non-empty: refine matching legacy entries field by field
/// 4. Legacy empty: no-op, logged as error
#[derive(Debug, Clone)]
pub struct DefaultFeedMergeStrategy {
    events: Arc<dyn EventSink>,
}

impl DefaultFeedMergeStrategy {
    /// Create strategy reporting through `tracing`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(TracingEventSink),
        }
    }

    /// With event sink
    #[inline]
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }
}

impl Default for DefaultFeedMergeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedMergeStrategy for DefaultFeedMergeStrategy {
    fn merge(&self, context: &mut MatchFeedContext) -> MergeDecision {
        let (request, records, legacy) = context.parts_mut();
        if request.fallback_request {
            return MergeDecision::SkippedFallback;
        }

        let user_id = request.user_id;
        self.events.emit(FeedEvent::MergeStarted { user_id });

        match (records.is_empty(), legacy.is_empty()) {
            (true, true) => {
                self.events.emit(FeedEvent::BothSourcesEmpty { user_id });
                MergeDecision::BothEmpty
            }
            (true, false) => {
                self.events.emit(FeedEvent::LegacyOnly {
                    user_id,
                    legacy_matches: legacy.len(),
                });
                MergeDecision::LegacyOnly
            }
            (false, true) => {
                self.events.emit(FeedEvent::PrimaryOnly {
                    user_id,
                    store_matches: records.len(),
                });
                MergeDecision::PrimaryOnly
            }
            (false, false) => {
                let mut refined = 0;
                let mut skipped = 0;
                for record in records {
                    let match_id = record.legacy_key();
                    let Some(entry) = legacy.get_mut(&match_id) else {
                        self.events.emit(FeedEvent::MatchNotInLegacy {
                            match_id,
                            user_id: record.owner_user_id,
                        });
                        skipped += 1;
                        continue;
                    };
                    overlay_profile(entry.profile_mut(), record, self.events.as_ref());
                    refined += 1;
                }
                MergeDecision::Merged { refined, skipped }
            }
        }
    }

    fn name(&self) -> &'static str {
        "default"
    }
}
