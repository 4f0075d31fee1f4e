//! Host configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::provider::TelemetryProvider;
use crate::providers::{LiveProvider, MockProvider};
use crate::radar::ProximityEngine;
use crate::{RadarError, Result};

/// Default telemetry poll rate
pub const DEFAULT_POLL_RATE_HZ: u32 = 20;
/// Highest poll rate accepted; iRacing itself publishes at 60 Hz
pub const MAX_POLL_RATE_HZ: u32 = 60;

/// Which telemetry source the host reads from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Live on Windows, mock everywhere else
    #[default]
    Auto,
    /// iRacing shared memory
    Live,
    /// Deterministic synthetic session
    Mock,
}

impl ProviderKind {
    /// Resolve `Auto` for the current platform
    pub fn resolve(self) -> Self {
        match self {
            ProviderKind::Auto if cfg!(windows) => ProviderKind::Live,
            ProviderKind::Auto => ProviderKind::Mock,
            other => other,
        }
    }

    /// Build the provider this kind stands for
    pub fn create(self) -> Box<dyn TelemetryProvider> {
        let resolved = self.resolve();
        info!(requested = ?self, provider = ?resolved, "Creating telemetry provider");

        match resolved {
            ProviderKind::Live => Box::new(LiveProvider::new()),
            ProviderKind::Mock | ProviderKind::Auto => Box::new(MockProvider::new()),
        }
    }
}

/// Settings for the radar host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Maximum number of cars shown
    pub max_cars: usize,

    /// Telemetry polls per second
    pub poll_rate_hz: u32,

    /// Telemetry source
    pub provider: ProviderKind,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            max_cars: ProximityEngine::DEFAULT_MAX_CARS,
            poll_rate_hz: DEFAULT_POLL_RATE_HZ,
            provider: ProviderKind::Auto,
        }
    }
}

impl RadarConfig {
    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<()> {
        if self.max_cars == 0 {
            return Err(RadarError::invalid_config("max_cars", "must be at least 1"));
        }

        if !(1..=MAX_POLL_RATE_HZ).contains(&self.poll_rate_hz) {
            return Err(RadarError::invalid_config(
                "poll_rate_hz",
                format!("{} is outside 1..={}", self.poll_rate_hz, MAX_POLL_RATE_HZ),
            ));
        }

        Ok(())
    }

    /// Time between two telemetry polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.poll_rate_hz.max(1) as f64)
    }
}
