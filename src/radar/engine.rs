//! Top-K proximity ranking over a telemetry snapshot

use crate::radar::math::{RADAR_RANGE_METERS, delta_meters, is_danger};
use crate::types::{CarProximity, TelemetrySnapshot};
use crate::{RadarError, Result};

/// Ranks the cars around the player by distance, keeping at most `max_cars` of them.
///
/// The engine owns a fixed-capacity buffer that is refilled on every call, so ranking a
/// snapshot never allocates. Results borrow from that buffer and are only valid until the
/// next call; each polling loop owns its own engine.
///
/// ```rust
/// use overlap::{ProximityEngine, TelemetrySnapshot, TrackSurface};
///
/// let mut engine = ProximityEngine::new(6)?;
/// let snapshot = TelemetrySnapshot::new(
///     0,
///     5000.0,
///     vec![0.5, 0.5002, 0.4990],
///     vec![TrackSurface::OnTrack; 3],
/// );
///
/// let cars = engine.compute_closest(&snapshot);
/// assert_eq!(cars.len(), 2);
/// assert_eq!(cars[0].car_idx, 1);
/// assert!(cars[0].is_danger);
/// # Ok::<(), overlap::RadarError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProximityEngine {
    buffer: Box<[CarProximity]>,
    len: usize,
}

impl ProximityEngine {
    /// Capacity used by the overlay unless configured otherwise.
    pub const DEFAULT_MAX_CARS: usize = 6;

    /// Create an engine tracking at most `max_cars` cars.
    ///
    /// # Errors
    ///
    /// Returns [`RadarError::InvalidCapacity`] when `max_cars` is zero.
    pub fn new(max_cars: usize) -> Result<Self> {
        if max_cars == 0 {
            return Err(RadarError::invalid_capacity(max_cars));
        }

        Ok(Self { buffer: vec![CarProximity::default(); max_cars].into_boxed_slice(), len: 0 })
    }

    /// Maximum number of cars a single call can return.
    pub fn max_cars(&self) -> usize {
        self.buffer.len()
    }

    /// Result of the most recent call to [`compute_closest`](Self::compute_closest).
    pub fn last_result(&self) -> &[CarProximity] {
        &self.buffer[..self.len]
    }

    /// Rank the cars near the player, closest first.
    ///
    /// Unusable snapshots (disconnected, no player, non-positive track length, player slot
    /// outside the arrays) produce an empty result. Only on-track cars within
    /// [`RADAR_RANGE_METERS`] are considered; equal distances keep scan order.
    pub fn compute_closest(&mut self, snapshot: &TelemetrySnapshot) -> &[CarProximity] {
        self.len = 0;

        let Some(player) = player_slot(snapshot) else {
            return self.last_result();
        };

        let my_pct = snapshot.car_lap_dist_pct[player];
        let track_length_m = snapshot.track_length_m;

        let slots = snapshot.car_lap_dist_pct.iter().zip(&snapshot.car_track_surface);
        for (slot, (&other_pct, surface)) in slots.enumerate() {
            if slot == player || !surface.is_on_track() {
                continue;
            }

            let delta = delta_meters(my_pct, other_pct, track_length_m);
            // NaN fails this comparison too
            if !(delta.abs() <= RADAR_RANGE_METERS) {
                continue;
            }

            self.insert_by_distance(CarProximity {
                car_idx: slot,
                delta_meters: delta,
                is_danger: is_danger(delta),
                left_right: snapshot.left_right(slot),
            });
        }

        self.last_result()
    }

    /// Insert behind every retained entry at the same or smaller distance.
    fn insert_by_distance(&mut self, candidate: CarProximity) {
        let capacity = self.buffer.len();
        let distance = candidate.delta_meters.abs();

        let insert_idx = self.buffer[..self.len]
            .iter()
            .position(|existing| existing.delta_meters.abs() > distance)
            .unwrap_or(self.len);

        if insert_idx >= capacity {
            return;
        }

        // When full, the last entry falls off the end
        let shift_end = self.len.min(capacity - 1);
        self.buffer.copy_within(insert_idx..shift_end, insert_idx + 1);
        self.buffer[insert_idx] = candidate;

        if self.len < capacity {
            self.len += 1;
        }
    }
}

impl Default for ProximityEngine {
    fn default() -> Self {
        Self {
            buffer: vec![CarProximity::default(); Self::DEFAULT_MAX_CARS].into_boxed_slice(),
            len: 0,
        }
    }
}

/// The player's slot, if the snapshot can be ranked at all.
fn player_slot(snapshot: &TelemetrySnapshot) -> Option<usize> {
    if !snapshot.connected {
        return None;
    }

    let track_length_m = snapshot.track_length_m;
    if !(track_length_m > 0.0) || !track_length_m.is_finite() {
        return None;
    }

    let player = usize::try_from(snapshot.player_car_idx).ok()?;
    if player >= snapshot.car_lap_dist_pct.len() || player >= snapshot.car_track_surface.len() {
        return None;
    }

    Some(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{SnapshotBuilder, cars_at_offsets};
    use crate::types::TrackSurface;

    fn indices(cars: &[CarProximity]) -> Vec<usize> {
        cars.iter().map(|car| car.car_idx).collect()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = ProximityEngine::new(0).unwrap_err();
        assert!(matches!(err, RadarError::InvalidCapacity { requested: 0 }));
    }

    #[test]
    fn default_tracks_six_cars() {
        assert_eq!(ProximityEngine::default().max_cars(), 6);
        assert_eq!(ProximityEngine::new(3).unwrap().max_cars(), 3);
    }

    #[test]
    fn filters_on_track_and_limits_count() {
        let mut lap_pct = vec![0.5f32];
        lap_pct.extend((1..10).map(|i| 0.5 + i as f32 * 0.0002));
        let mut surfaces = vec![TrackSurface::OnTrack; 10];
        surfaces[9] = TrackSurface::OffTrack;

        let snapshot = TelemetrySnapshot::new(0, 5000.0, lap_pct, surfaces);
        let mut engine = ProximityEngine::new(6).unwrap();
        let cars = engine.compute_closest(&snapshot);

        assert!(cars.len() <= 6);
        assert!(cars.iter().all(|car| car.delta_meters.abs() <= RADAR_RANGE_METERS));
        assert!(cars.iter().all(|car| car.car_idx != 9));
        assert!(cars.iter().all(|car| car.car_idx != 0));
        assert_eq!(indices(cars), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn disconnected_snapshot_is_empty() {
        let mut snapshot = cars_at_offsets(0.5, &[1.0, -1.0]);
        snapshot.connected = false;

        let mut engine = ProximityEngine::default();
        assert!(engine.compute_closest(&snapshot).is_empty());
    }

    #[test]
    fn player_index_out_of_bounds_is_empty() {
        let mut engine = ProximityEngine::default();

        let mut snapshot = cars_at_offsets(0.5, &[1.0, -1.0]);
        snapshot.player_car_idx = 3;
        assert!(engine.compute_closest(&snapshot).is_empty());

        snapshot.player_car_idx = 64;
        assert!(engine.compute_closest(&snapshot).is_empty());

        snapshot.player_car_idx = -1;
        assert!(engine.compute_closest(&snapshot).is_empty());
    }

    #[test]
    fn player_beyond_surface_array_is_empty() {
        let snapshot = SnapshotBuilder::new()
            .car(0.5, TrackSurface::OnTrack)
            .car(0.5002, TrackSurface::OnTrack)
            .player(1)
            .build_with_surfaces(vec![TrackSurface::OnTrack]);

        let mut engine = ProximityEngine::default();
        assert!(engine.compute_closest(&snapshot).is_empty());
    }

    #[test]
    fn unusable_track_length_is_empty() {
        let mut engine = ProximityEngine::default();
        for length in [0.0, -5000.0, f32::NAN, f32::INFINITY] {
            let mut snapshot = cars_at_offsets(0.5, &[1.0]);
            snapshot.track_length_m = length;
            assert!(engine.compute_closest(&snapshot).is_empty(), "length {length}");
        }
    }

    #[test]
    fn orders_by_absolute_distance() {
        let snapshot = cars_at_offsets(0.5, &[8.0, -3.0, 5.0, -1.0, 9.5]);
        let mut engine = ProximityEngine::default();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![4, 2, 3, 1, 5]);
        assert!(cars[0].delta_meters < 0.0);
        assert!(cars[0].is_danger);
        assert!(!cars[1].is_danger);
    }

    #[test]
    fn equal_distances_keep_scan_order() {
        // Powers of two keep every delta exact
        let snapshot = SnapshotBuilder::new()
            .car(0.25, TrackSurface::OnTrack)
            .car(0.25 + 0.0078125, TrackSurface::OnTrack)
            .car(0.25 - 0.0078125, TrackSurface::OnTrack)
            .car(0.25 + 0.0078125, TrackSurface::OnTrack)
            .track_length(1000.0)
            .build();

        let mut engine = ProximityEngine::default();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![1, 2, 3]);
        let deltas: Vec<f32> = cars.iter().map(|car| car.delta_meters).collect();
        assert_eq!(deltas, vec![7.8125, -7.8125, 7.8125]);
    }

    #[test]
    fn tie_with_full_buffer_keeps_earlier_car() {
        let snapshot = SnapshotBuilder::new()
            .car(0.25, TrackSurface::OnTrack)
            .car(0.25 + 0.00390625, TrackSurface::OnTrack)
            .car(0.25 - 0.00390625, TrackSurface::OnTrack)
            .track_length(1000.0)
            .build();

        let mut engine = ProximityEngine::new(1).unwrap();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![1]);
    }

    #[test]
    fn full_buffer_drops_farthest() {
        let snapshot = cars_at_offsets(0.5, &[9.0, 7.0, 5.0, 3.0, 1.0]);
        let mut engine = ProximityEngine::new(3).unwrap();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![5, 4, 3]);
    }

    #[test]
    fn candidate_farther_than_full_buffer_is_discarded() {
        let snapshot = cars_at_offsets(0.5, &[1.0, 2.0, 9.0]);
        let mut engine = ProximityEngine::new(2).unwrap();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![1, 2]);
    }

    #[test]
    fn out_of_range_cars_are_skipped() {
        let snapshot = cars_at_offsets(0.5, &[10.5, -10.5, 4.0]);
        let mut engine = ProximityEngine::default();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![3]);
    }

    #[test]
    fn wraps_across_start_finish_line() {
        // 0.9995 -> 0.0003 is 4 m ahead on a 5 km track
        let snapshot = SnapshotBuilder::new()
            .car(0.9995, TrackSurface::OnTrack)
            .car(0.0003, TrackSurface::OnTrack)
            .car(0.9990, TrackSurface::OnTrack)
            .track_length(5000.0)
            .build();

        let mut engine = ProximityEngine::default();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![2, 1]);
        assert!((cars[0].delta_meters + 2.5).abs() < 0.05);
        assert!((cars[1].delta_meters - 4.0).abs() < 0.05);
    }

    #[test]
    fn non_finite_fractions_are_skipped() {
        let snapshot = SnapshotBuilder::new()
            .car(0.5, TrackSurface::OnTrack)
            .car(f32::NAN, TrackSurface::OnTrack)
            .car(f32::INFINITY, TrackSurface::OnTrack)
            .car(0.5002, TrackSurface::OnTrack)
            .track_length(5000.0)
            .build();

        let mut engine = ProximityEngine::default();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![3]);
    }

    #[test]
    fn left_right_hint_only_when_present() {
        let snapshot = cars_at_offsets(0.5, &[1.0, 2.5, 4.0]).with_left_right(vec![0, 2, 3]);

        let mut engine = ProximityEngine::default();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(cars[0].left_right, Some(2));
        assert_eq!(cars[1].left_right, Some(3));
        assert_eq!(cars[2].left_right, None);
    }

    #[test]
    fn zero_hint_is_distinct_from_absent() {
        let snapshot = cars_at_offsets(0.5, &[1.0, 3.0]).with_left_right(vec![5, 0]);

        let mut engine = ProximityEngine::default();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(cars[0].left_right, Some(0));
        assert_eq!(cars[1].left_right, None);
    }

    #[test]
    fn stale_entries_never_leak_into_next_call() {
        let mut engine = ProximityEngine::default();

        let busy = cars_at_offsets(0.5, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(engine.compute_closest(&busy).len(), 6);

        let quiet = cars_at_offsets(0.5, &[7.0]);
        let cars = engine.compute_closest(&quiet);
        assert_eq!(indices(cars), vec![1]);
        assert_eq!(engine.last_result().len(), 1);

        assert!(engine.compute_closest(&TelemetrySnapshot::disconnected()).is_empty());
        assert!(engine.last_result().is_empty());
    }

    #[test]
    fn arrays_of_different_length_bound_the_scan() {
        let snapshot = SnapshotBuilder::new()
            .car(0.5, TrackSurface::OnTrack)
            .car(0.5002, TrackSurface::OnTrack)
            .car(0.5004, TrackSurface::OnTrack)
            .track_length(5000.0)
            .build_with_surfaces(vec![TrackSurface::OnTrack; 2]);

        let mut engine = ProximityEngine::default();
        let cars = engine.compute_closest(&snapshot);

        assert_eq!(indices(cars), vec![1]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn arb_snapshot()(
                slots in prop::collection::vec(
                    (0.0f32..1.0f32, -1i32..5i32),
                    0..64
                ),
                hints in prop::collection::vec(-1i32..3i32, 0..64),
                player in -2i32..66i32,
                track_length_m in prop::sample::select(vec![0.0f32, 800.0, 5000.0, 25000.0]),
                cluster in any::<bool>(),
                connected in prop::bool::weighted(0.9)
            ) -> TelemetrySnapshot {
                // Clustered fractions put most cars inside radar range
                let lap_pct = slots
                    .iter()
                    .map(|(pct, _)| if cluster { 0.5 + (pct - 0.5) * 0.004 } else { *pct })
                    .collect();
                let surfaces = slots.iter().map(|(_, raw)| TrackSurface::from_raw(*raw)).collect();

                TelemetrySnapshot {
                    connected,
                    player_car_idx: player,
                    track_length_m,
                    car_lap_dist_pct: lap_pct,
                    car_track_surface: surfaces,
                    car_left_right: hints,
                }
            }
        }

        proptest! {
            #[test]
            fn results_respect_every_invariant(
                snapshot in arb_snapshot(),
                max_cars in 1usize..10usize
            ) {
                let mut engine = ProximityEngine::new(max_cars).unwrap();
                let cars = engine.compute_closest(&snapshot).to_vec();

                prop_assert!(cars.len() <= max_cars);
                if !snapshot.connected {
                    prop_assert!(cars.is_empty());
                }

                for car in &cars {
                    prop_assert!(car.delta_meters.abs() <= RADAR_RANGE_METERS);
                    prop_assert_ne!(car.car_idx as i32, snapshot.player_car_idx);
                    prop_assert!(snapshot.car_track_surface[car.car_idx].is_on_track());
                    prop_assert_eq!(car.is_danger, is_danger(car.delta_meters));
                    prop_assert_eq!(car.left_right, snapshot.left_right(car.car_idx));
                }

                for pair in cars.windows(2) {
                    prop_assert!(pair[0].delta_meters.abs() <= pair[1].delta_meters.abs());
                }
            }

            #[test]
            fn matches_stable_sort_of_all_candidates(
                snapshot in arb_snapshot(),
                max_cars in 1usize..10usize
            ) {
                let mut engine = ProximityEngine::new(max_cars).unwrap();
                let cars = engine.compute_closest(&snapshot).to_vec();

                let mut unbounded = ProximityEngine::new(64).unwrap();
                let mut all = unbounded.compute_closest(&snapshot).to_vec();
                all.sort_by(|a, b| a.delta_meters.abs().total_cmp(&b.delta_meters.abs()));
                all.truncate(max_cars);

                prop_assert_eq!(indices(&cars), indices(&all));
            }
        }
    }
}
