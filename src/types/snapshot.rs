//! Telemetry snapshot consumed by the proximity engine

use serde::{Deserialize, Serialize};

use super::TrackSurface;

/// One capture of simulator state at a single acquisition instant.
///
/// Per-car data is held in parallel arrays indexed by car slot. The arrays may have
/// different lengths: a short `car_left_right` array means the hint is absent for the
/// missing slots. When `connected` is false every other field is meaningless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Whether the provider currently has live data
    pub connected: bool,

    /// Slot of the player's car; negative when the simulator reports none
    pub player_car_idx: i32,

    /// Track length in meters
    pub track_length_m: f32,

    /// Lap-distance fraction per slot, nominally in [0, 1)
    pub car_lap_dist_pct: Vec<f32>,

    /// Surface state per slot
    pub car_track_surface: Vec<TrackSurface>,

    /// Optional left/right proximity hint per slot
    pub car_left_right: Vec<i32>,
}

impl TelemetrySnapshot {
    /// Create a connected snapshot without left/right hints.
    pub fn new(
        player_car_idx: i32,
        track_length_m: f32,
        car_lap_dist_pct: Vec<f32>,
        car_track_surface: Vec<TrackSurface>,
    ) -> Self {
        Self {
            connected: true,
            player_car_idx,
            track_length_m,
            car_lap_dist_pct,
            car_track_surface,
            car_left_right: Vec::new(),
        }
    }

    /// The snapshot every provider falls back to when it has no usable data.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            player_car_idx: -1,
            track_length_m: 0.0,
            car_lap_dist_pct: Vec::new(),
            car_track_surface: Vec::new(),
            car_left_right: Vec::new(),
        }
    }

    /// Attach per-slot left/right hints.
    pub fn with_left_right(mut self, car_left_right: Vec<i32>) -> Self {
        self.car_left_right = car_left_right;
        self
    }

    /// Hint for a slot, or `None` when the hint array does not reach it.
    pub fn left_right(&self, slot: usize) -> Option<i32> {
        self.car_left_right.get(slot).copied()
    }

    /// Number of slots present in both the lap-distance and surface arrays.
    pub fn scannable_slots(&self) -> usize {
        self.car_lap_dist_pct.len().min(self.car_track_surface.len())
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self::disconnected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnected_snapshot_is_empty() {
        let snapshot = TelemetrySnapshot::disconnected();
        assert!(!snapshot.connected);
        assert_eq!(snapshot.player_car_idx, -1);
        assert_eq!(snapshot.scannable_slots(), 0);
        assert_eq!(snapshot, TelemetrySnapshot::default());
    }

    #[test]
    fn short_hint_array_means_absent() {
        let snapshot = TelemetrySnapshot::new(
            0,
            5000.0,
            vec![0.1, 0.2, 0.3],
            vec![TrackSurface::OnTrack; 3],
        )
        .with_left_right(vec![0, 2]);

        assert_eq!(snapshot.left_right(0), Some(0));
        assert_eq!(snapshot.left_right(1), Some(2));
        assert_eq!(snapshot.left_right(2), None);
    }

    #[test]
    fn scannable_slots_bounded_by_shorter_array() {
        let snapshot = TelemetrySnapshot::new(
            0,
            5000.0,
            vec![0.1, 0.2, 0.3, 0.4],
            vec![TrackSurface::OnTrack; 2],
        );
        assert_eq!(snapshot.scannable_slots(), 2);
    }
}
