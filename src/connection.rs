//! Running radar host and its subscriptions

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::RadarConfig;
use crate::driver::RadarDriver;
use crate::provider::TelemetryProvider;
use crate::radar::ProximityEngine;
use crate::stream::ResampleExt;
use crate::types::{RadarView, UpdateRate};
use crate::{RadarError, Result};

/// Handle to a running radar host.
///
/// Owns the polling task. Dropping the handle cancels the task; [`RadarConnection::shutdown`]
/// additionally waits until the provider has been released.
pub struct RadarConnection {
    views: watch::Receiver<RadarView>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    provider_name: &'static str,
    poll_rate_hz: u32,
}

impl RadarConnection {
    /// Validate `config` and start polling `provider`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<P>(provider: P, config: &RadarConfig) -> Result<Self>
    where
        P: TelemetryProvider,
    {
        config.validate()?;
        let engine = ProximityEngine::new(config.max_cars)?;
        let provider_name = provider.name();

        let channels = RadarDriver::spawn(provider, engine, config.poll_interval());

        info!(
            provider = provider_name,
            poll_rate_hz = config.poll_rate_hz,
            max_cars = config.max_cars,
            "Radar host started"
        );

        Ok(Self {
            views: channels.views,
            cancel: channels.cancel,
            task: Some(channels.task),
            provider_name,
            poll_rate_hz: config.poll_rate_hz,
        })
    }

    /// Most recent view; the waiting view before the first poll
    pub fn latest(&self) -> RadarView {
        self.views.borrow().clone()
    }

    /// Subscribe to radar views
    ///
    /// `Native` yields the current view immediately and then every published poll.
    /// `Max(hz)` redraws at a fixed cadence, repeating the latest view between polls.
    /// The stream ends once the polling task has stopped.
    pub fn subscribe(
        &self,
        rate: UpdateRate,
    ) -> impl Stream<Item = RadarView> + Send + Unpin + 'static {
        let views = WatchStream::new(self.views.clone());

        match rate.interval() {
            None => views.boxed(),
            Some(period) => views.resample(period).boxed(),
        }
    }

    /// Name of the provider being polled
    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    pub fn poll_rate_hz(&self) -> u32 {
        self.poll_rate_hz
    }

    /// Stop polling and wait for the provider to be released
    pub async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down radar host");
        self.cancel.cancel();

        if let Some(task) = self.task.take() {
            task.await.map_err(|e| RadarError::HostTask { reason: e.to_string() })?;
        }

        Ok(())
    }
}

impl Drop for RadarConnection {
    fn drop(&mut self) {
        debug!("Dropping radar connection");
        self.cancel.cancel();
    }
}
