//! ActivityLog - step events to the external log sink
//!
//! Mirrors every step transition to tracing and appends it to the configured
//! `EventSink`. Sink failures are recorded and swallowed; the activity log
//! must never abort a run.

use contracts::{ContractError, EventSink, PipelineEvent, PipelineStep};
use tracing::{error, info, warn};

use crate::metrics::record_event_dropped;

/// Step-level activity logger
///
/// Holds the optional sink; `None` means events are disabled and only
/// tracing output is produced.
pub struct ActivityLog<E: EventSink> {
    sink: Option<E>,
}

impl<E: EventSink> ActivityLog<E> {
    pub fn new(sink: Option<E>) -> Self {
        Self { sink }
    }

    /// Whether an external sink is attached
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Record a step start
    pub async fn step_started(&mut self, step: PipelineStep) {
        info!(step = %step, "Step started");
        self.emit(PipelineEvent::started(step)).await;
    }

    /// Record a step success
    pub async fn step_succeeded(&mut self, step: PipelineStep, message: impl Into<String>) {
        let message = message.into();
        info!(step = %step, message = %message, "Step succeeded");
        self.emit(PipelineEvent::succeeded(step, message)).await;
    }

    /// Record a step failure
    pub async fn step_failed(&mut self, step: PipelineStep, err: &ContractError) {
        error!(step = %step, error = %err, "Step failed");
        self.emit(PipelineEvent::failed(step, err.to_string())).await;
    }

    /// Flush the sink, swallowing errors
    pub async fn flush(&mut self) {
        if let Some(sink) = &mut self.sink {
            if let Err(e) = sink.flush().await {
                warn!(sink = sink.name(), error = %e, "Activity sink flush failed");
            }
        }
    }

    async fn emit(&mut self, event: PipelineEvent) {
        let Some(sink) = &mut self.sink else {
            return;
        };
        if let Err(e) = sink.emit(event).await {
            record_event_dropped(sink.name());
            warn!(sink = sink.name(), error = %e, "Activity event dropped");
        }
    }
}
