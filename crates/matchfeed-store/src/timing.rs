//! Timing ports
//!
//! The retriever reads time through a [`Clock`] and reports durations to a
//! [`TimerSink`], so tests run without wall-clock or metrics infrastructure.

use matchfeed_model::MatchStatusGroup;
use metrics::histogram;
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current instant
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Destination for named timer observations
pub trait TimerSink: Send + Sync + std::fmt::Debug {
    /// Record one elapsed duration under `name`
    fn record(&self, name: &str, elapsed: Duration);
}

/// Records timers as `metrics` histograms, in seconds
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsTimerSink;

impl TimerSink for MetricsTimerSink {
    fn record(&self, name: &str, elapsed: Duration) {
        histogram!(name.to_string()).record(elapsed.as_secs_f64());
    }
}

/// Timer name: `<prefix>[.<statusGroupName>]`
#[must_use]
pub fn timer_name(prefix: &str, group: Option<MatchStatusGroup>) -> String {
    match group {
        Some(group) => format!("{prefix}.{}", group.name()),
        None => prefix.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_name_appends_group() {
        assert_eq!(
            timer_name("feed.fetch", Some(MatchStatusGroup::Communication)),
            "feed.fetch.communication"
        );
        assert_eq!(timer_name("feed.fetch", None), "feed.fetch");
    }

    #[test]
    fn metrics_sink_without_recorder_is_silent() {
        MetricsTimerSink.record("feed.fetch", Duration::from_millis(5));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
