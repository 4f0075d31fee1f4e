//! iRacing shared memory access
//!
//! The live provider maps the simulator's telemetry file lazily on its first read and
//! drops the mapping when released. Only the header is read: the SDK version and the
//! connected status bit decide whether the source is usable.

mod shared_memory;

pub use shared_memory::{IRSDKHeader, SharedMemory, VarBuf};
