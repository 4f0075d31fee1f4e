//! Proximity radar core.
//!
//! [`math`] holds the circular-track arithmetic and [`ProximityEngine`] ranks the cars
//! around the player. Neither performs I/O or logging; everything here is a bounded,
//! synchronous computation over one snapshot.

mod engine;
pub mod math;

pub use engine::ProximityEngine;
pub use math::{
    DANGER_THRESHOLD_METERS, RADAR_RANGE_METERS, delta_meters, is_danger, wrap_lap_difference,
};
