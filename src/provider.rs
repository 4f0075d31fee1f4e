//! Provider trait for telemetry sources

use crate::types::TelemetrySnapshot;

/// Trait for telemetry sources
///
/// Providers hide where snapshots come from (simulator shared memory, synthetic data).
/// They never fail outward: any acquisition problem is reported as
/// [`TelemetrySnapshot::disconnected`] so the engine always has something to rank.
pub trait TelemetryProvider: Send + 'static {
    /// Capture the current simulator state
    ///
    /// Must return promptly; the polling loop calls this at its poll rate and does
    /// nothing else in between.
    fn read_frame(&mut self) -> TelemetrySnapshot;

    /// Release any resource acquired by the provider
    ///
    /// Called once by the polling loop when it stops. Implementations must tolerate
    /// repeated calls and must not acquire the resource again afterwards.
    fn release(&mut self) {}

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

impl<P: TelemetryProvider + ?Sized> TelemetryProvider for Box<P> {
    fn read_frame(&mut self) -> TelemetrySnapshot {
        (**self).read_frame()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
