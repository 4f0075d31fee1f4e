//! Live telemetry provider backed by iRacing shared memory

use tracing::{debug, info};

use crate::Result;
use crate::provider::TelemetryProvider;
use crate::types::TelemetrySnapshot;

#[cfg(windows)]
use crate::windows::SharedMemory;

/// Failed opens between two "still waiting" log lines (about 10s at 20 Hz)
const WAITING_LOG_INTERVAL: u32 = 200;

/// Live provider that reads from iRacing shared memory
///
/// The mapping is opened on the first read, not at construction, and re-attempted on
/// every read until it succeeds. Per-car variables are not decoded yet, so this
/// provider currently always yields [`TelemetrySnapshot::disconnected`]; it exists so
/// the host can hold the simulator's memory the same way a full reader will.
pub struct LiveProvider {
    #[cfg(windows)]
    memory: Option<SharedMemory>,

    /// Consecutive failed open attempts
    failed_opens: u32,

    /// Set once [`TelemetryProvider::release`] ran; no further opens happen
    released: bool,
}

impl LiveProvider {
    /// Create a provider; nothing is opened until the first read
    pub fn new() -> Self {
        Self {
            #[cfg(windows)]
            memory: None,
            failed_opens: 0,
            released: false,
        }
    }

    /// Whether the shared memory is currently mapped
    pub fn is_open(&self) -> bool {
        #[cfg(windows)]
        {
            self.memory.is_some()
        }
        #[cfg(not(windows))]
        {
            false
        }
    }

    /// Number of consecutive failed open attempts
    pub fn failed_opens(&self) -> u32 {
        self.failed_opens
    }

    #[cfg(windows)]
    fn ensure_open(&mut self) -> Result<&SharedMemory> {
        if self.memory.is_none() {
            self.memory = Some(SharedMemory::open()?);
        }
        match self.memory.as_ref() {
            Some(memory) => Ok(memory),
            None => Err(crate::RadarError::connection_failed("shared memory not mapped")),
        }
    }

    #[cfg(windows)]
    fn try_read(&mut self) -> Result<TelemetrySnapshot> {
        let memory = self.ensure_open()?;

        if !memory.is_connected() {
            tracing::trace!("Shared memory mapped but no active session");
            return Ok(TelemetrySnapshot::disconnected());
        }

        // Variable decoding is not implemented; a mapped, connected source still
        // yields nothing to rank
        tracing::trace!(
            tick_rate = memory.header().tick_rate,
            "Session active, variables not decoded"
        );
        Ok(TelemetrySnapshot::disconnected())
    }

    #[cfg(not(windows))]
    fn try_read(&mut self) -> Result<TelemetrySnapshot> {
        Err(crate::RadarError::unsupported_platform("Live telemetry", "Windows"))
    }

    fn record_failure(&mut self, error: &crate::RadarError) {
        self.failed_opens = self.failed_opens.saturating_add(1);

        if self.failed_opens == 1 {
            info!("Waiting for iRacing: {}", error);
        } else if self.failed_opens % WAITING_LOG_INTERVAL == 0 {
            debug!("Still waiting for iRacing after {} attempts: {}", self.failed_opens, error);
        }
    }
}

impl Default for LiveProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryProvider for LiveProvider {
    fn read_frame(&mut self) -> TelemetrySnapshot {
        if self.released {
            return TelemetrySnapshot::disconnected();
        }

        match self.try_read() {
            Ok(snapshot) => {
                if self.failed_opens > 0 {
                    info!("iRacing shared memory available after {} attempts", self.failed_opens);
                    self.failed_opens = 0;
                }
                snapshot
            }
            Err(error) => {
                #[cfg(windows)]
                {
                    // Drop a mapping that went bad so the next read starts fresh
                    self.memory = None;
                }
                self.record_failure(&error);
                TelemetrySnapshot::disconnected()
            }
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        #[cfg(windows)]
        {
            if self.memory.take().is_some() {
                info!("Released iRacing shared memory");
                return;
            }
        }

        debug!("Live provider released without an open mapping");
    }

    fn name(&self) -> &'static str {
        "live"
    }
}

impl Drop for LiveProvider {
    fn drop(&mut self) {
        if !self.released {
            debug!("Live provider dropped without release");
            self.release();
        }
    }
}
