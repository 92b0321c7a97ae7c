//! Fault-isolated feed retrieval
//!
//! [`FeedRetriever::fetch`] makes one timed query attempt and captures any
//! store failure on the returned [`FeedResponse`]. [`FeedRetriever::fetch_safe`]
//! adds an outer boundary so that nothing, including a panic anywhere in the
//! pipeline, escapes to the caller.

use crate::repository::MatchStoreQueryRepository;
use crate::resolver::QueryParamResolver;
use crate::timing::{timer_name, Clock, MetricsTimerSink, SystemClock, TimerSink};
use futures::FutureExt;
use matchfeed_model::{
    EventSink, FeedError, FeedEvent, FeedRequestContext, FeedResponse, Outcome, StoreError,
    TracingEventSink,
};
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Timer name prefix for [`FeedRetriever::fetch`]
pub const TIMER_PREFIX: &str = "matchfeed.feed_retriever.fetch";

/// Runs primary-store queries for feed requests
///
/// Holds no per-request state; one instance serves all requests.
#[derive(Clone)]
pub struct FeedRetriever {
    repository: Arc<dyn MatchStoreQueryRepository>,
    resolver: QueryParamResolver,
    clock: Arc<dyn Clock>,
    timers: Arc<dyn TimerSink>,
    events: Arc<dyn EventSink>,
}

impl FeedRetriever {
    /// Create retriever with production clock, metrics timers and tracing events
    #[must_use]
    pub fn new(repository: Arc<dyn MatchStoreQueryRepository>, resolver: QueryParamResolver) -> Self {
        Self {
            repository,
            resolver,
            clock: Arc::new(SystemClock),
            timers: Arc::new(MetricsTimerSink),
            events: Arc::new(TracingEventSink),
        }
    }

    /// With clock
    #[inline]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// With timer sink
    #[inline]
    #[must_use]
    pub fn with_timers(mut self, timers: Arc<dyn TimerSink>) -> Self {
        self.timers = timers;
        self
    }

    /// With event sink
    #[inline]
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Query resolver in use
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &QueryParamResolver {
        &self.resolver
    }

    /// One timed query attempt
    ///
    /// Failures while resolving or running the query, including panics, are
    /// captured in [`FeedResponse::error`]. The timer is recorded and the
    /// response time reported on every path.
    pub async fn fetch(&self, request: &FeedRequestContext) -> FeedResponse {
        let group = request.status_group;
        let mut response = FeedResponse::new(group);
        let timer = timer_name(TIMER_PREFIX, group);
        let started = self.clock.now();

        let attempt = async {
            let query = self.resolver.resolve(request);
            self.repository.match_data_feed(&query).await
        };
        let result = AssertUnwindSafe(attempt)
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(StoreError::from_panic(payload.as_ref())));

        match result {
            Ok(items) => response.set_items(items),
            Err(error) => {
                let error = FeedError::from(error);
                self.events.emit(FeedEvent::QueryFailed {
                    user_id: request.user_id,
                    status_group: group,
                    error: error.clone(),
                });
                response.set_error(error);
            }
        }

        let elapsed = self.clock.now().saturating_duration_since(started);
        self.timers.record(&timer, elapsed);
        self.events.emit(FeedEvent::ResponseTime {
            user_id: request.user_id,
            status_group: group,
            elapsed,
        });

        response
    }

    /// [`fetch`](Self::fetch) under an outer fault boundary
    ///
    /// Always yields a response for the request's status group. Failures come
    /// back as [`Outcome::Degraded`] with the (possibly empty) response.
    pub async fn fetch_safe(&self, request: &FeedRequestContext) -> Outcome<FeedResponse> {
        match AssertUnwindSafe(self.fetch(request)).catch_unwind().await {
            Ok(response) => response.into_outcome(),
            Err(payload) => {
                let error = FeedError::from_panic(payload.as_ref());
                self.events.emit(FeedEvent::SafeFallback {
                    user_id: request.user_id,
                    status_group: request.status_group,
                    error: error.clone(),
                });
                Outcome::Degraded(FeedResponse::new(request.status_group), error)
            }
        }
    }
}

impl fmt::Debug for FeedRetriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedRetriever")
            .field("resolver", &self.resolver)
            .field("clock", &self.clock)
            .field("timers", &self.timers)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::{FeedLimits, FeedLimitsConfig, GroupLimits};
    use crate::query::MatchDataFeedQuery;
    use crate::repository::MockMatchStoreQueryRepository;
    use async_trait::async_trait;
    use matchfeed_model::{MatchRecord, MatchStatus, MatchStatusGroup};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Debug, Default)]
    struct Recorder {
        events: Mutex<Vec<FeedEvent>>,
        timers: Mutex<Vec<(String, Duration)>>,
    }

    impl EventSink for Recorder {
        fn emit(&self, event: FeedEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl TimerSink for Recorder {
        fn record(&self, name: &str, elapsed: Duration) {
            self.timers.lock().unwrap().push((name.to_string(), elapsed));
        }
    }

    /// Advances 7ms on every read
    #[derive(Debug)]
    struct SteppingClock {
        base: Instant,
        ticks: Mutex<u64>,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> Instant {
            let mut ticks = self.ticks.lock().unwrap();
            *ticks += 1;
            self.base + Duration::from_millis(7 * *ticks)
        }
    }

    #[derive(Debug)]
    struct PanickingLimits;

    impl FeedLimits for PanickingLimits {
        fn default_limit(&self, _group: Option<MatchStatusGroup>) -> Option<u32> {
            panic!("limits unavailable")
        }

        fn fallback_limit(&self, _group: Option<MatchStatusGroup>) -> Option<u32> {
            panic!("limits unavailable")
        }
    }

    #[derive(Debug)]
    struct PanickingTimers;

    impl TimerSink for PanickingTimers {
        fn record(&self, _name: &str, _elapsed: Duration) {
            panic!("metrics recorder gone")
        }
    }

    struct PanickingRepository;

    #[async_trait]
    impl MatchStoreQueryRepository for PanickingRepository {
        async fn match_data_feed(
            &self,
            _query: &MatchDataFeedQuery,
        ) -> Result<Vec<MatchRecord>, StoreError> {
            panic!("connection pool poisoned")
        }
    }

    fn resolver() -> QueryParamResolver {
        let limits = FeedLimitsConfig::new()
            .with_group(MatchStatusGroup::New, GroupLimits::new(20, 50));
        QueryParamResolver::new(Vec::new(), Arc::new(limits))
    }

    fn retriever(
        repository: Arc<dyn MatchStoreQueryRepository>,
        recorder: &Arc<Recorder>,
    ) -> FeedRetriever {
        FeedRetriever::new(repository, resolver())
            .with_clock(Arc::new(SteppingClock {
                base: Instant::now(),
                ticks: Mutex::new(0),
            }))
            .with_timers(recorder.clone())
            .with_events(recorder.clone())
    }

    fn request() -> FeedRequestContext {
        FeedRequestContext::new(11)
            .with_group(MatchStatusGroup::New)
            .with_statuses([MatchStatus::New])
    }

    #[tokio::test]
    async fn fetch_populates_records() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed()
            .withf(|q| q.user_id == 11 && q.limit() == Some(20) && q.status_filters == vec![0])
            .times(1)
            .returning(|_| Ok(vec![MatchRecord::new(1, 11, 2), MatchRecord::new(3, 11, 4)]));

        let recorder = Arc::new(Recorder::default());
        let response = retriever(Arc::new(repo), &recorder).fetch(&request()).await;

        assert!(response.is_data_available());
        assert_eq!(response.items().len(), 2);
        assert!(response.error().is_none());
        assert_eq!(response.status_group(), Some(MatchStatusGroup::New));
    }

    #[tokio::test]
    async fn fetch_empty_result_is_not_available() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed().returning(|_| Ok(Vec::new()));

        let recorder = Arc::new(Recorder::default());
        let response = retriever(Arc::new(repo), &recorder).fetch(&request()).await;

        assert!(!response.is_data_available());
        assert!(response.error().is_none());
    }

    #[tokio::test]
    async fn fetch_captures_store_error() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed()
            .returning(|_| Err(StoreError::Unavailable("region down".to_string())));

        let recorder = Arc::new(Recorder::default());
        let response = retriever(Arc::new(repo), &recorder).fetch(&request()).await;

        assert_eq!(
            response.error(),
            Some(&FeedError::Store(StoreError::Unavailable("region down".to_string())))
        );
        let events = recorder.events.lock().unwrap();
        assert!(matches!(events[0], FeedEvent::QueryFailed { user_id: 11, .. }));
        assert!(matches!(events[1], FeedEvent::ResponseTime { .. }));
    }

    #[tokio::test]
    async fn fetch_captures_repository_panic() {
        let recorder = Arc::new(Recorder::default());
        let response = retriever(Arc::new(PanickingRepository), &recorder)
            .fetch(&request())
            .await;

        assert_eq!(
            response.error(),
            Some(&FeedError::Store(StoreError::Unexpected(
                "connection pool poisoned".to_string()
            )))
        );
        assert_eq!(recorder.timers.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn timer_recorded_with_group_name_and_elapsed() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed().returning(|_| Ok(Vec::new()));

        let recorder = Arc::new(Recorder::default());
        retriever(Arc::new(repo), &recorder).fetch(&request()).await;

        let timers = recorder.timers.lock().unwrap();
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].0, "matchfeed.feed_retriever.fetch.new");
        assert_eq!(timers[0].1, Duration::from_millis(7));

        let events = recorder.events.lock().unwrap();
        assert_eq!(
            events.last(),
            Some(&FeedEvent::ResponseTime {
                user_id: 11,
                status_group: Some(MatchStatusGroup::New),
                elapsed: Duration::from_millis(7),
            })
        );
    }

    #[tokio::test]
    async fn timer_name_without_group() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed().returning(|_| Ok(Vec::new()));

        let recorder = Arc::new(Recorder::default());
        retriever(Arc::new(repo), &recorder)
            .fetch(&FeedRequestContext::new(11))
            .await;

        assert_eq!(recorder.timers.lock().unwrap()[0].0, TIMER_PREFIX);
    }

    #[tokio::test]
    async fn fetch_safe_tags_store_failure_as_degraded() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed()
            .returning(|_| Err(StoreError::Timeout { elapsed_ms: 900 }));

        let recorder = Arc::new(Recorder::default());
        let outcome = retriever(Arc::new(repo), &recorder)
            .fetch_safe(&request())
            .await;

        assert!(outcome.is_degraded());
        assert!(outcome.cause().unwrap().is_store_failure());
        assert_eq!(outcome.value().status_group(), Some(MatchStatusGroup::New));
    }

    #[tokio::test]
    async fn fetch_captures_limits_panic_and_still_times() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed().never();

        let resolver = QueryParamResolver::new(Vec::new(), Arc::new(PanickingLimits));
        let recorder = Arc::new(Recorder::default());
        let retriever = FeedRetriever::new(Arc::new(repo), resolver)
            .with_timers(recorder.clone())
            .with_events(recorder.clone());

        let response = retriever.fetch(&request()).await;

        assert_eq!(
            response.error(),
            Some(&FeedError::Store(StoreError::Unexpected(
                "limits unavailable".to_string()
            )))
        );
        assert_eq!(response.status_group(), Some(MatchStatusGroup::New));
        assert_eq!(recorder.timers.lock().unwrap().len(), 1);
        let events = recorder.events.lock().unwrap();
        assert!(matches!(events[0], FeedEvent::QueryFailed { user_id: 11, .. }));
        assert!(matches!(events[1], FeedEvent::ResponseTime { user_id: 11, .. }));
    }

    #[tokio::test]
    async fn fetch_safe_contains_pipeline_panic() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed()
            .returning(|_| Ok(vec![MatchRecord::new(5, 11, 6)]));

        let recorder = Arc::new(Recorder::default());
        let retriever = FeedRetriever::new(Arc::new(repo), resolver())
            .with_timers(Arc::new(PanickingTimers))
            .with_events(recorder.clone());

        let outcome = retriever.fetch_safe(&request()).await;

        match outcome {
            Outcome::Degraded(response, FeedError::Pipeline(message)) => {
                assert_eq!(message, "metrics recorder gone");
                assert_eq!(response.status_group(), Some(MatchStatusGroup::New));
                assert!(response.items().is_empty());
            }
            other => panic!("expected pipeline degradation, got {other:?}"),
        }
        let events = recorder.events.lock().unwrap();
        assert!(matches!(events.last(), Some(FeedEvent::SafeFallback { .. })));
    }

    #[tokio::test]
    async fn fetch_safe_success_is_ok() {
        let mut repo = MockMatchStoreQueryRepository::new();
        repo.expect_match_data_feed()
            .returning(|_| Ok(vec![MatchRecord::new(5, 11, 6)]));

        let recorder = Arc::new(Recorder::default());
        let outcome = retriever(Arc::new(repo), &recorder)
            .fetch_safe(&request())
            .await;

        assert!(matches!(outcome, Outcome::Ok(ref r) if r.is_data_available()));
    }
}
