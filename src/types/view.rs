//! Radar view published by the host after every poll

use serde::{Deserialize, Serialize};

use super::CarProximity;

/// Connection state shown by an overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarStatus {
    /// No usable telemetry; overlays show a waiting message instead of stale cars
    #[default]
    WaitingForConnection,

    /// The latest snapshot came from a connected source
    Live,
}

/// The latest ranking, as seen by subscribers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarView {
    /// Connection state of the snapshot this view was computed from
    pub status: RadarStatus,

    /// Number of polls performed so far; 0 before the first poll
    pub poll: u64,

    /// Nearby cars, closest first
    pub cars: Vec<CarProximity>,
}

impl RadarView {
    /// Whether the overlay should show the waiting message.
    pub fn is_waiting(&self) -> bool {
        self.status == RadarStatus::WaitingForConnection
    }

    /// Cars inside the danger threshold.
    pub fn danger_cars(&self) -> impl Iterator<Item = &CarProximity> {
        self.cars.iter().filter(|car| car.is_danger)
    }
}
