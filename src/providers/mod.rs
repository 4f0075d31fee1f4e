//! Telemetry provider implementations

pub mod live;
pub mod mock;

pub use live::LiveProvider;
pub use mock::MockProvider;
