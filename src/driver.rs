//! Driver spawns and runs the telemetry polling task

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::provider::TelemetryProvider;
use crate::radar::ProximityEngine;
use crate::types::{RadarStatus, RadarView};

/// Result of spawning the polling task
pub struct DriverChannels {
    /// Receiver for the latest radar view
    pub views: watch::Receiver<RadarView>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
    /// Handle of the polling task; completes after the provider was released
    pub task: JoinHandle<()>,
}

/// Driver owns the provider and the engine for the lifetime of one polling task
///
/// Acquisition and ranking happen in the same loop iteration, so the engine's buffer
/// never needs synchronization. Subscribers only ever see copies published through the
/// watch channel.
pub struct RadarDriver;

impl RadarDriver {
    /// Spawn the polling task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<P>(provider: P, engine: ProximityEngine, poll_interval: Duration) -> DriverChannels
    where
        P: TelemetryProvider,
    {
        let (view_tx, view_rx) = watch::channel(RadarView::default());
        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        let task = tokio::spawn(async move {
            Self::poll_task(provider, engine, poll_interval, view_tx, cancel_task).await;
        });

        DriverChannels { views: view_rx, cancel, task }
    }

    async fn poll_task<P>(
        mut provider: P,
        mut engine: ProximityEngine,
        poll_interval: Duration,
        view_tx: watch::Sender<RadarView>,
        cancel: CancellationToken,
    ) where
        P: TelemetryProvider,
    {
        info!(
            provider = provider.name(),
            poll_ms = poll_interval.as_millis() as u64,
            max_cars = engine.max_cars(),
            "Radar polling task started"
        );

        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut polls = 0u64;
        let mut last_status = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Radar polling task cancelled");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let snapshot = provider.read_frame();
            polls += 1;

            let status =
                if snapshot.connected { RadarStatus::Live } else { RadarStatus::WaitingForConnection };
            if last_status != Some(status) {
                match status {
                    RadarStatus::Live => info!("Telemetry connected"),
                    RadarStatus::WaitingForConnection => info!("Waiting for telemetry connection"),
                }
                last_status = Some(status);
            }

            let cars = engine.compute_closest(&snapshot);
            trace!(poll = polls, cars = cars.len(), "Radar updated");

            // Reuse the published vector instead of allocating a new one per poll
            view_tx.send_modify(|view| {
                view.status = status;
                view.poll = polls;
                view.cars.clear();
                view.cars.extend_from_slice(cars);
            });
        }

        provider.release();
        info!("Radar polling task ended after {} polls", polls);
    }
}
