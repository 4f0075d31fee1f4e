//! Update rate control for radar view subscriptions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often a subscriber receives radar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateRate {
    /// Every view the polling task publishes
    Native,

    /// Fixed render cadence in Hz; the latest view is re-emitted on every tick,
    /// even when no new poll happened in between
    Max(u32),
}

impl UpdateRate {
    /// Normalize the rate. A zero render rate is meaningless and falls back to `Native`.
    pub fn normalize(self) -> Self {
        match self {
            UpdateRate::Max(0) => UpdateRate::Native,
            other => other,
        }
    }

    /// Render tick interval, if this rate has one.
    pub fn interval(self) -> Option<Duration> {
        match self.normalize() {
            UpdateRate::Native => None,
            UpdateRate::Max(hz) => Some(Duration::from_secs_f64(1.0 / hz as f64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_has_no_interval() {
        assert_eq!(UpdateRate::Native.interval(), None);
    }

    #[test]
    fn zero_hz_normalizes_to_native() {
        assert_eq!(UpdateRate::Max(0).normalize(), UpdateRate::Native);
        assert_eq!(UpdateRate::Max(0).interval(), None);
    }

    #[test]
    fn max_rate_interval() {
        assert_eq!(UpdateRate::Max(50).interval(), Some(Duration::from_millis(20)));
        assert_eq!(UpdateRate::Max(1).interval(), Some(Duration::from_secs(1)));
    }
}
