//! Proximity radar engine for sim-racing overlays.
//!
//! Overlap reads per-car lap positions from the simulator, works out how far every
//! other car is from the player along the racing line, and keeps the handful of cars
//! that are close enough to matter. A renderer only has to draw what it is handed.
//!
//! # Features
//!
//! - **Allocation-free ranking**: the engine reuses one fixed buffer across polls
//! - **Start/finish aware**: distances wrap correctly across the line
//! - **Pluggable sources**: iRacing shared memory on Windows, a synthetic session anywhere
//! - **Stream subscriptions**: every poll, or a fixed render cadence
//!
//! ## Example (synthetic session)
//!
//! ```rust,no_run
//! use overlap::{Overlap, ProviderKind, RadarConfig, UpdateRate};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> overlap::Result<()> {
//!     let config = RadarConfig { provider: ProviderKind::Mock, ..RadarConfig::default() };
//!     let connection = Overlap::start(&config)?;
//!     let mut views = connection.subscribe(UpdateRate::Max(30));
//!
//!     while let Some(view) = views.next().await {
//!         for car in view.danger_cars() {
//!             println!("car {} at {:+.1} m", car.car_idx, car.delta_meters);
//!         }
//!     }
//!     connection.shutdown().await
//! }
//! ```
//!
//! ## Example (engine only)
//!
//! ```rust
//! use overlap::{ProximityEngine, TelemetrySnapshot, TrackSurface};
//!
//! let snapshot = TelemetrySnapshot::new(
//!     0,
//!     5000.0,
//!     vec![0.5, 0.5002, 0.9],
//!     vec![TrackSurface::OnTrack; 3],
//! );
//!
//! let mut engine = ProximityEngine::default();
//! let cars = engine.compute_closest(&snapshot);
//! assert_eq!(cars.len(), 1);
//! assert_eq!(cars[0].car_idx, 1);
//! assert!(cars[0].is_danger);
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Ranking
pub mod radar;

// Host
pub mod config;
pub mod connection;
pub mod driver;
pub mod provider;
pub mod providers;
pub mod settings;
pub mod stream;

// Platform-specific modules
#[cfg(windows)]
pub mod windows;

// Core exports
pub use error::*;
pub use types::*;

pub use config::{ProviderKind, RadarConfig};
pub use connection::RadarConnection;
pub use provider::TelemetryProvider;
pub use providers::{LiveProvider, MockProvider};
pub use radar::{DANGER_THRESHOLD_METERS, ProximityEngine, RADAR_RANGE_METERS};
pub use settings::{OverlaySettings, SettingsStore};

/// Unified entry point for starting a radar host.
pub struct Overlap;

impl Overlap {
    /// Start polling the provider named in `config`.
    ///
    /// `ProviderKind::Auto` picks the iRacing provider on Windows and the synthetic session
    /// elsewhere. The live provider never fails to start: until the simulator runs, the
    /// published views simply report that the radar is waiting for a connection.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::InvalidConfig`] when `config` is out of range.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use overlap::{Overlap, RadarConfig};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> overlap::Result<()> {
    /// let connection = Overlap::start(&RadarConfig::default())?;
    /// println!("{:?}", connection.latest());
    /// # connection.shutdown().await
    /// # }
    /// ```
    pub fn start(config: &RadarConfig) -> Result<RadarConnection> {
        config.validate()?;
        RadarConnection::start(config.provider.create(), config)
    }

    /// Start polling a caller-supplied provider.
    pub fn start_with<P>(provider: P, config: &RadarConfig) -> Result<RadarConnection>
    where
        P: TelemetryProvider,
    {
        RadarConnection::start(provider, config)
    }
}
