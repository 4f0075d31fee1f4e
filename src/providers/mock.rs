//! Deterministic synthetic telemetry for development

use tracing::{debug, trace};

use crate::provider::TelemetryProvider;
use crate::types::{TelemetrySnapshot, TrackSurface};

/// Number of car slots the simulator exposes
pub const MOCK_CAR_SLOTS: usize = 64;
/// Track length used by the mock session
pub const MOCK_TRACK_LENGTH_M: f32 = 5000.0;
/// Lap fraction the player advances per frame (4 m at 5 km)
pub const MOCK_PLAYER_STEP: f32 = 0.0008;
/// Lap fraction between neighbouring slots (1 m at 5 km)
pub const MOCK_CAR_SPACING: f32 = 0.0002;

const MOCK_PLAYER_IDX: usize = 0;

/// Synthetic session: a train of cars spaced one meter apart around the player.
///
/// Each read advances the player by [`MOCK_PLAYER_STEP`]. Slot `i` sits
/// `(i - 2) * MOCK_CAR_SPACING` from the player, so slot 1 is one meter behind, slot 2
/// level with the player and higher slots progressively ahead. Positions wrap at the
/// start/finish line.
#[derive(Debug, Clone)]
pub struct MockProvider {
    lap_dist_pct: Vec<f32>,
    frames: u64,
}

impl MockProvider {
    /// Mock session with [`MOCK_CAR_SLOTS`] cars, player on the line
    pub fn new() -> Self {
        Self::with_car_count(MOCK_CAR_SLOTS)
    }

    /// Mock session with a custom number of slots (at least the player's)
    pub fn with_car_count(car_count: usize) -> Self {
        Self { lap_dist_pct: vec![0.0; car_count.max(MOCK_PLAYER_IDX + 1)], frames: 0 }
    }

    /// Start the player at a given lap fraction
    pub fn starting_at(mut self, player_pct: f32) -> Self {
        self.lap_dist_pct[MOCK_PLAYER_IDX] = wrap_unit(player_pct);
        self
    }

    /// Frames produced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn advance(&mut self) {
        let player_pct = wrap_unit(self.lap_dist_pct[MOCK_PLAYER_IDX] + MOCK_PLAYER_STEP);
        self.lap_dist_pct[MOCK_PLAYER_IDX] = player_pct;

        for (slot, pct) in self.lap_dist_pct.iter_mut().enumerate() {
            if slot == MOCK_PLAYER_IDX {
                continue;
            }
            let offset = (slot as f32 - 2.0) * MOCK_CAR_SPACING;
            *pct = wrap_unit(player_pct + offset);
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryProvider for MockProvider {
    fn read_frame(&mut self) -> TelemetrySnapshot {
        self.advance();
        self.frames += 1;

        trace!(
            frame = self.frames,
            player_pct = self.lap_dist_pct[MOCK_PLAYER_IDX],
            "Mock frame"
        );

        TelemetrySnapshot::new(
            MOCK_PLAYER_IDX as i32,
            MOCK_TRACK_LENGTH_M,
            self.lap_dist_pct.clone(),
            vec![TrackSurface::OnTrack; self.lap_dist_pct.len()],
        )
    }

    fn release(&mut self) {
        debug!("Mock provider released after {} frames", self.frames);
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Bring a fraction that drifted at most one lap out of range back into [0, 1].
fn wrap_unit(pct: f32) -> f32 {
    if pct > 1.0 {
        pct - 1.0
    } else if pct < 0.0 {
        pct + 1.0
    } else {
        pct
    }
}
