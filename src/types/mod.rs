//! Core value types shared by providers, the engine and the host.
//!
//! - [`TelemetrySnapshot`] is one immutable capture of simulator state
//! - [`TrackSurface`] decodes the simulator's per-car surface integers
//! - [`CarProximity`] is the engine's output record
//! - [`RadarView`] is what the host publishes to subscribers after every poll
//! - [`UpdateRate`] selects a subscriber's cadence
//!
//! ## Usage Example
//!
//! ```rust
//! use overlap::types::{TelemetrySnapshot, TrackSurface};
//!
//! let snapshot = TelemetrySnapshot::new(
//!     0,
//!     5000.0,
//!     vec![0.5, 0.5004],
//!     vec![TrackSurface::OnTrack, TrackSurface::OnTrack],
//! );
//! assert_eq!(snapshot.scannable_slots(), 2);
//! assert_eq!(snapshot.left_right(1), None);
//! ```

mod proximity;
mod snapshot;
mod surface;
mod update_rate;
mod view;

pub use proximity::CarProximity;
pub use snapshot::TelemetrySnapshot;
pub use surface::TrackSurface;
pub use update_rate::UpdateRate;
pub use view::{RadarStatus, RadarView};
