//! Pipeline metrics collection
//!
//! Record helpers feed the Prometheus exporter; `StepTimings` aggregates
//! per-step durations in memory for the run summary.

use std::time::Duration;

use contracts::PipelineStep;
use metrics::{counter, gauge, histogram};

/// Record one completed step's duration
pub fn record_step_duration(step: PipelineStep, duration: Duration) {
    histogram!(
        "nba_lake_step_duration_seconds",
        "step" => step.as_str()
    )
    .record(duration.as_secs_f64());
    counter!(
        "nba_lake_steps_completed_total",
        "step" => step.as_str()
    )
    .increment(1);
}

/// Record the fetched payload size
pub fn record_records_fetched(count: usize) {
    counter!("nba_lake_records_fetched_total").increment(count as u64);
    gauge!("nba_lake_last_fetch_records").set(count as f64);
}

/// Record the number of records written to the lake
pub fn record_records_written(count: usize) {
    counter!("nba_lake_records_written_total").increment(count as u64);
}

/// Record the written object's size
pub fn record_bytes_written(bytes: u64) {
    counter!("nba_lake_bytes_written_total").increment(bytes);
    gauge!("nba_lake_last_object_bytes").set(bytes as f64);
}

/// Record an activity event the sink refused
pub fn record_event_dropped(sink_name: &str) {
    counter!(
        "nba_lake_events_dropped_total",
        "sink" => sink_name.to_string()
    )
    .increment(1);
}

/// Record run completion
pub fn record_run_completed(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "nba_lake_runs_total",
        "status" => status.to_string()
    )
    .increment(1);
}

/// Per-step duration aggregator for the run summary
#[derive(Debug, Clone, Default)]
pub struct StepTimings {
    entries: Vec<(PipelineStep, Duration)>,
}

impl StepTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed step
    pub fn push(&mut self, step: PipelineStep, duration: Duration) {
        self.entries.push((step, duration));
    }

    /// Steps completed so far, in completion order
    pub fn iter(&self) -> impl Iterator<Item = &(PipelineStep, Duration)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total time across completed steps
    pub fn total(&self) -> Duration {
        self.entries.iter().map(|(_, d)| *d).sum()
    }

    /// Slowest completed step
    pub fn slowest(&self) -> Option<(PipelineStep, Duration)> {
        self.entries.iter().max_by_key(|(_, d)| *d).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_timings_aggregate() {
        let mut timings = StepTimings::new();
        timings.push(PipelineStep::Provision, Duration::from_millis(120));
        timings.push(PipelineStep::Fetch, Duration::from_millis(800));
        timings.push(PipelineStep::Write, Duration::from_millis(300));

        assert_eq!(timings.len(), 3);
        assert_eq!(timings.total(), Duration::from_millis(1220));
        assert_eq!(
            timings.slowest(),
            Some((PipelineStep::Fetch, Duration::from_millis(800)))
        );
    }

    #[test]
    fn test_empty_timings() {
        let timings = StepTimings::new();
        assert!(timings.is_empty());
        assert_eq!(timings.slowest(), None);
        assert_eq!(timings.total(), Duration::ZERO);
    }
}
