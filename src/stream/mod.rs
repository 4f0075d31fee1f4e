//! Stream utilities for radar subscriptions

mod resample;

pub use resample::{Resample, ResampleExt};
