//! Testing utilities for the matches feed workspace
//!
//! Shared test doubles for the store, timing and diagnostics ports, plus
//! record and legacy-feed fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use matchfeed_model::{
    EventSink, FeedEvent, LegacyFeed, LegacyMatch, MatchRecord, MatchedUserProfile,
    ProfileField, ProfileOverlay, StoreError,
};
use matchfeed_store::{Clock, MatchDataFeedQuery, MatchStoreQueryRepository, TimerSink};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// What a [`StubRepository`] does when queried
#[derive(Debug, Clone)]
pub enum StubBehaviour {
    Records(Vec<MatchRecord>),
    Fail(StoreError),
    Panic(String),
}

/// Repository returning a canned answer and remembering every query
#[derive(Debug)]
pub struct StubRepository {
    behaviour: StubBehaviour,
    queries: Mutex<Vec<MatchDataFeedQuery>>,
}

impl StubRepository {
    pub fn returning(records: Vec<MatchRecord>) -> Self {
        Self::new(StubBehaviour::Records(records))
    }

    pub fn failing(error: StoreError) -> Self {
        Self::new(StubBehaviour::Fail(error))
    }

    pub fn panicking(message: &str) -> Self {
        Self::new(StubBehaviour::Panic(message.to_string()))
    }

    fn new(behaviour: StubBehaviour) -> Self {
        Self {
            behaviour,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().len()
    }

    pub fn last_query(&self) -> Option<MatchDataFeedQuery> {
        self.queries.lock().last().cloned()
    }
}

#[async_trait]
impl MatchStoreQueryRepository for StubRepository {
    async fn match_data_feed(
        &self,
        query: &MatchDataFeedQuery,
    ) -> Result<Vec<MatchRecord>, StoreError> {
        self.queries.lock().push(query.clone());
        match &self.behaviour {
            StubBehaviour::Records(records) => Ok(records.clone()),
            StubBehaviour::Fail(error) => Err(error.clone()),
            StubBehaviour::Panic(message) => panic!("{message}"),
        }
    }
}

/// Event sink keeping every event in order
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<FeedEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FeedEvent> {
        self.events.lock().clone()
    }

    pub fn count_at(&self, level: tracing::Level) -> usize {
        self.events.lock().iter().filter(|e| e.level() == level).count()
    }

    pub fn missing_fields(&self) -> Vec<ProfileField> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                FeedEvent::FieldMissing { field, .. } => Some(*field),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: FeedEvent) {
        self.events.lock().push(event);
    }
}

/// Timer sink keeping every observation
#[derive(Debug, Default)]
pub struct RecordingTimerSink {
    records: Mutex<Vec<(String, Duration)>>,
}

impl RecordingTimerSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(String, Duration)> {
        self.records.lock().clone()
    }
}

impl TimerSink for RecordingTimerSink {
    fn record(&self, name: &str, elapsed: Duration) {
        self.records.lock().push((name.to_string(), elapsed));
    }
}

/// Clock advancing a fixed step on every read
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
    step: Duration,
}

impl ManualClock {
    pub fn stepping(step: Duration) -> Self {
        Self {
            now: Mutex::new(Instant::now()),
            step,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let mut now = self.now.lock();
        let current = *now;
        *now = current + self.step;
        current
    }
}

/// Fully populated matched-user profile
pub fn full_profile() -> MatchedUserProfile {
    MatchedUserProfile {
        gender: 2,
        country: 1,
        city: Some("Austin".to_string()),
        first_name: Some("Jordan".to_string()),
        state_code: Some("TX".to_string()),
        birthdate: Some(Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()),
    }
}

/// Record for `owner` with a fully populated profile
pub fn create_record(match_id: i64, owner_user_id: i64) -> MatchRecord {
    MatchRecord::new(match_id, owner_user_id, match_id + 1000).with_profile(full_profile())
}

/// Legacy profile with placeholder values in every typed field
pub fn legacy_profile() -> ProfileOverlay {
    ProfileOverlay::new()
        .with("gender", 1)
        .with("country", 9)
        .with("userid", 0)
        .with("city", "Legacy City")
        .with("firstName", "Legacy")
        .with("stateCode", "ZZ")
        .with("birthdate", 0)
}

/// Legacy feed with one [`legacy_profile`] entry per match id
pub fn create_legacy_feed(match_ids: &[i64]) -> LegacyFeed {
    match_ids.iter().fold(LegacyFeed::new(), |feed, id| {
        feed.with_match(id.to_string(), LegacyMatch::with_profile(legacy_profile()))
    })
}
