//! Test utilities for building telemetry snapshots and scripted providers
//!
//! Shared by unit tests, integration tests and benchmarks.

#![cfg(any(test, feature = "benchmark"))]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::provider::TelemetryProvider;
use crate::types::{TelemetrySnapshot, TrackSurface};

/// Track length used by the helpers unless overridden
pub const TEST_TRACK_LENGTH_M: f32 = 5000.0;

/// Fluent builder for connected snapshots.
///
/// Cars are added in slot order. The player defaults to slot 0 and the track to
/// [`TEST_TRACK_LENGTH_M`].
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    player_car_idx: i32,
    track_length_m: f32,
    lap_dist_pct: Vec<f32>,
    surfaces: Vec<TrackSurface>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            player_car_idx: 0,
            track_length_m: TEST_TRACK_LENGTH_M,
            lap_dist_pct: Vec::new(),
            surfaces: Vec::new(),
        }
    }

    /// Append a car in the next free slot
    pub fn car(mut self, lap_dist_pct: f32, surface: TrackSurface) -> Self {
        self.lap_dist_pct.push(lap_dist_pct);
        self.surfaces.push(surface);
        self
    }

    pub fn player(mut self, player_car_idx: i32) -> Self {
        self.player_car_idx = player_car_idx;
        self
    }

    pub fn track_length(mut self, track_length_m: f32) -> Self {
        self.track_length_m = track_length_m;
        self
    }

    pub fn build(self) -> TelemetrySnapshot {
        TelemetrySnapshot::new(
            self.player_car_idx,
            self.track_length_m,
            self.lap_dist_pct,
            self.surfaces,
        )
    }

    /// Build with a surface array that replaces the per-car surfaces, e.g. a shorter one
    pub fn build_with_surfaces(self, surfaces: Vec<TrackSurface>) -> TelemetrySnapshot {
        TelemetrySnapshot::new(self.player_car_idx, self.track_length_m, self.lap_dist_pct, surfaces)
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Player in slot 0 at `player_pct`, car `i + 1` placed `offsets_m[i]` meters from it.
///
/// All cars are on track and the track is [`TEST_TRACK_LENGTH_M`] long.
pub fn cars_at_offsets(player_pct: f32, offsets_m: &[f32]) -> TelemetrySnapshot {
    offsets_m
        .iter()
        .fold(SnapshotBuilder::new().car(player_pct, TrackSurface::OnTrack), |builder, offset| {
            builder.car(player_pct + offset / TEST_TRACK_LENGTH_M, TrackSurface::OnTrack)
        })
        .build()
}

/// A full 64-slot field with most cars bunched around the player.
///
/// Used by benchmarks to exercise the insertion path with many candidates in range.
pub fn dense_field_snapshot() -> TelemetrySnapshot {
    let lap_pct = (0..64)
        .map(|slot| {
            // Alternate cars just ahead and just behind, with a few far away
            let spread = (slot % 16) as f32 * 0.00012;
            let sign = if slot % 2 == 0 { 1.0 } else { -1.0 };
            let base = if slot >= 48 { 0.2 } else { 0.5 };
            base + sign * spread
        })
        .collect::<Vec<f32>>();

    let surfaces = (0..64)
        .map(|slot| if slot % 11 == 5 { TrackSurface::InPitStall } else { TrackSurface::OnTrack })
        .collect();

    TelemetrySnapshot::new(0, TEST_TRACK_LENGTH_M, lap_pct, surfaces)
}

/// Shared count of `release` calls made on a [`ScriptedProvider`]
#[derive(Debug, Clone, Default)]
pub struct ReleaseCounter(Arc<AtomicUsize>);

impl ReleaseCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Provider that replays a fixed script of snapshots.
///
/// A sequence falls back to the disconnected snapshot once exhausted; a repeating
/// provider returns the same snapshot forever.
#[derive(Debug)]
pub struct ScriptedProvider {
    script: VecDeque<TelemetrySnapshot>,
    repeat: Option<TelemetrySnapshot>,
    releases: ReleaseCounter,
}

impl ScriptedProvider {
    pub fn sequence(snapshots: Vec<TelemetrySnapshot>) -> Self {
        Self { script: snapshots.into(), repeat: None, releases: ReleaseCounter::default() }
    }

    pub fn repeating(snapshot: TelemetrySnapshot) -> Self {
        Self { script: VecDeque::new(), repeat: Some(snapshot), releases: ReleaseCounter::default() }
    }

    /// Handle that keeps counting after the provider moved into a task
    pub fn release_counter(&self) -> ReleaseCounter {
        self.releases.clone()
    }
}

impl TelemetryProvider for ScriptedProvider {
    fn read_frame(&mut self) -> TelemetrySnapshot {
        if let Some(next) = self.script.pop_front() {
            return next;
        }
        self.repeat.clone().unwrap_or_else(TelemetrySnapshot::disconnected)
    }

    fn release(&mut self) {
        self.releases.bump();
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
