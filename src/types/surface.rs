//! Track surface classification per car slot

use serde::{Deserialize, Serialize};

/// Where a car currently is relative to the racing surface.
///
/// Decoded from the simulator's raw `CarIdxTrackSurface` integers. Values the simulator
/// may add later are kept as [`TrackSurface::Unknown`] rather than being folded into a
/// known state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackSurface {
    NotInWorld,
    OffTrack,
    InPitStall,
    ApproachingPits,
    OnTrack,
    Unknown(i32),
}

impl TrackSurface {
    /// Decode a raw simulator surface value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            -1 => TrackSurface::NotInWorld,
            0 => TrackSurface::OffTrack,
            1 => TrackSurface::InPitStall,
            2 => TrackSurface::ApproachingPits,
            3 => TrackSurface::OnTrack,
            other => TrackSurface::Unknown(other),
        }
    }

    /// Raw simulator value for this state.
    pub fn as_raw(self) -> i32 {
        match self {
            TrackSurface::NotInWorld => -1,
            TrackSurface::OffTrack => 0,
            TrackSurface::InPitStall => 1,
            TrackSurface::ApproachingPits => 2,
            TrackSurface::OnTrack => 3,
            TrackSurface::Unknown(raw) => raw,
        }
    }

    /// Only cars on the racing surface are shown on the radar.
    pub fn is_on_track(self) -> bool {
        matches!(self, TrackSurface::OnTrack)
    }
}

impl From<i32> for TrackSurface {
    fn from(raw: i32) -> Self {
        TrackSurface::from_raw(raw)
    }
}
