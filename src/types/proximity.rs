//! Proximity records emitted by the engine

use serde::{Deserialize, Serialize};

use crate::radar::math::RADAR_RANGE_METERS;

/// One nearby car relative to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarProximity {
    /// Slot of the source car in the snapshot arrays
    pub car_idx: usize,

    /// Signed distance along the track; positive is ahead of the player
    pub delta_meters: f32,

    /// Whether the car is inside the danger threshold
    pub is_danger: bool,

    /// Left/right hint from the snapshot, if it had one for this slot
    pub left_right: Option<i32>,
}

impl CarProximity {
    /// Offset scaled to the radar range, clamped to [-1, 1].
    ///
    /// A renderer places the marker at `center - offset * half_height`, so cars ahead
    /// appear above the player.
    pub fn normalized_offset(&self) -> f32 {
        (self.delta_meters / RADAR_RANGE_METERS).clamp(-1.0, 1.0)
    }
}
