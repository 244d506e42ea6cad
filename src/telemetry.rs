use crate::action::TriggerSource;

/// Outcome of one shown menu session, recorded exactly once on dismissal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOutcome {
    pub source: TriggerSource,
    /// Number of valid (enabled) actions the session was opened with
    pub valid_actions: usize,
    /// True when the menu was dismissed without applying an action
    pub cancelled: bool,
}

/// Sink for menu outcome events
pub trait TelemetrySink: Send + Sync {
    fn record(&self, outcome: &MenuOutcome);
}

/// Default sink that reports outcomes through `tracing`
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record(&self, outcome: &MenuOutcome) {
        tracing::debug!(
            event = "applyCodeAction",
            source = outcome.source.as_str(),
            valid_actions = outcome.valid_actions,
            cancelled = outcome.cancelled,
            "code action menu session ended"
        );
    }
}

/// Sink that drops all events
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn record(&self, _outcome: &MenuOutcome) {}
}
