//! Circular-track distance arithmetic

/// Cars farther than this from the player are not shown.
pub const RADAR_RANGE_METERS: f32 = 10.0;

/// Cars closer than this are flagged as a danger.
pub const DANGER_THRESHOLD_METERS: f32 = 2.0;

/// Map a raw lap-fraction difference onto the shortest signed path around the loop.
///
/// The canonical range is (-0.5, 0.5]: exactly half a lap ahead stays `0.5`, and exactly
/// half a lap behind is reported as half a lap ahead.
pub fn wrap_lap_difference(delta_pct: f32) -> f32 {
    if delta_pct > 0.5 {
        delta_pct - 1.0
    } else if delta_pct <= -0.5 {
        delta_pct + 1.0
    } else {
        delta_pct
    }
}

/// Signed distance in meters from the player to another car; positive is ahead.
pub fn delta_meters(my_pct: f32, other_pct: f32, track_length_m: f32) -> f32 {
    wrap_lap_difference(other_pct - my_pct) * track_length_m
}

/// Strictly inside the danger threshold, regardless of direction.
pub fn is_danger(delta_meters: f32) -> bool {
    delta_meters.abs() < DANGER_THRESHOLD_METERS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} within {tolerance}, got {actual}"
        );
    }

    #[test]
    fn wraps_into_expected_range() {
        assert_close(wrap_lap_difference(0.75), -0.25, 1e-3);
        assert_close(wrap_lap_difference(-0.75), 0.25, 1e-3);
        assert_close(wrap_lap_difference(0.2), 0.2, 1e-3);
    }

    #[test]
    fn half_lap_boundary_stays_positive() {
        assert_eq!(wrap_lap_difference(0.5), 0.5);
        assert_eq!(wrap_lap_difference(-0.5), 0.5);
        assert_eq!(wrap_lap_difference(1.5), 0.5);
    }

    #[test]
    fn delta_meters_uses_track_length_with_wrap() {
        assert_close(delta_meters(0.98, 0.01, 5000.0), 150.0, 1e-2);
        assert_close(delta_meters(0.01, 0.98, 5000.0), -150.0, 1e-2);
    }

    #[test]
    fn delta_meters_positive_when_ahead() {
        assert!(delta_meters(0.5, 0.5002, 5000.0) > 0.0);
        assert!(delta_meters(0.5, 0.4998, 5000.0) < 0.0);
    }

    #[test]
    fn danger_uses_strict_threshold() {
        assert!(is_danger(1.9));
        assert!(is_danger(-1.99));
        assert!(!is_danger(2.0));
        assert!(!is_danger(-2.0));
        assert!(!is_danger(5.0));
    }

    #[test]
    fn nan_is_never_danger() {
        assert!(!is_danger(f32::NAN));
    }

    proptest! {
        #[test]
        fn wrap_lands_in_canonical_interval(delta in -1.49f32..=1.5f32) {
            let wrapped = wrap_lap_difference(delta);
            prop_assert!(wrapped > -0.5 && wrapped <= 0.5, "{} wrapped to {}", delta, wrapped);
        }

        #[test]
        fn wrap_is_idempotent(delta in -1.49f32..=1.5f32) {
            let once = wrap_lap_difference(delta);
            prop_assert_eq!(wrap_lap_difference(once), once);
        }

        #[test]
        fn delta_is_antisymmetric_away_from_half_lap(
            my_pct in 0.0f32..1.0f32,
            offset in -0.4f32..0.4f32
        ) {
            let other_pct = my_pct + offset;
            let forward = delta_meters(my_pct, other_pct, 5000.0);
            let backward = delta_meters(other_pct, my_pct, 5000.0);
            prop_assert!((forward + backward).abs() < 1e-2);
        }

        #[test]
        fn danger_is_sign_agnostic(delta in -20.0f32..20.0f32) {
            prop_assert_eq!(is_danger(delta), is_danger(-delta));
        }
    }
}
