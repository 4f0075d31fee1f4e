//! Read-only view of iRacing's telemetry shared memory
//!
//! Maps the memory file with the same layout as the official C++ SDK header. Only the
//! header is interpreted; the per-car variables are not decoded yet.

use crate::{RadarError, Result};
use std::ptr::NonNull;
use tracing::{debug, trace};
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Memory::{
    FILE_MAP_READ, MEMORY_MAPPED_VIEW_ADDRESS, MapViewOfFile, OpenFileMappingW, UnmapViewOfFile,
};
use windows::core::PCWSTR;

/// iRacing shared memory file name
const IRSDK_MEMMAPFILENAME: &str = "Local\\IRSDKMemMapFileName";
/// Expected SDK version
const IRSDK_VER: i32 = 2;
/// Connection status flag
const IRSDK_ST_CONNECTED: i32 = 1;
/// Maximum number of telemetry buffers
const IRSDK_MAX_BUFS: usize = 4;

/// Variable buffer containing tick count and offset information
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VarBuf {
    pub tick_count: i32,
    pub buf_offset: i32,
    pub pad: [i32; 2],
}

/// Main iRacing header structure matching the C++ SDK
#[repr(C)]
#[derive(Debug)]
pub struct IRSDKHeader {
    pub ver: i32,
    pub status: i32,
    pub tick_rate: i32,

    pub session_info_update: i32,
    pub session_info_len: i32,
    pub session_info_offset: i32,

    pub num_vars: i32,
    pub var_header_offset: i32,

    pub num_buf: i32,
    pub buf_len: i32,
    pub pad1: [i32; 2],
    pub var_buf: [VarBuf; IRSDK_MAX_BUFS],
}

/// Mapped telemetry memory; unmapped when dropped
pub struct SharedMemory {
    mapping: HANDLE,
    base: NonNull<u8>,
}

impl SharedMemory {
    /// Open and map the telemetry file, then check the SDK version
    pub fn open() -> Result<Self> {
        trace!("Opening iRacing shared memory");

        let mapping = unsafe {
            let wide_name = wide_string(IRSDK_MEMMAPFILENAME);
            OpenFileMappingW(FILE_MAP_READ.0, false, PCWSTR::from_raw(wide_name.as_ptr()))
                .map_err(|e| RadarError::windows_api_error("OpenFileMappingW", e))?
        };

        let view = unsafe { MapViewOfFile(mapping, FILE_MAP_READ, 0, 0, 0) };
        let Some(base) = NonNull::new(view.Value as *mut u8) else {
            let win_err = windows::core::Error::from_thread();
            unsafe {
                let _ = CloseHandle(mapping);
            }
            return Err(RadarError::windows_api_error("MapViewOfFile", win_err));
        };

        // From here on Drop owns both the view and the handle
        let memory = Self { mapping, base };
        memory.validate()?;

        debug!("Mapped iRacing shared memory");
        Ok(memory)
    }

    /// Direct access to the header
    pub fn header(&self) -> &IRSDKHeader {
        unsafe { &*(self.base.as_ptr() as *const IRSDKHeader) }
    }

    /// Whether iRacing reports an active session
    pub fn is_connected(&self) -> bool {
        self.header().status & IRSDK_ST_CONNECTED != 0
    }

    fn validate(&self) -> Result<()> {
        let header = self.header();

        if header.ver != IRSDK_VER {
            return Err(RadarError::Version { expected: IRSDK_VER as u32, found: header.ver as u32 });
        }

        debug!(
            ver = header.ver,
            tick_rate = header.tick_rate,
            num_vars = header.num_vars,
            "Validated iRacing header"
        );

        Ok(())
    }
}

impl Drop for SharedMemory {
    fn drop(&mut self) {
        debug!("Unmapping iRacing shared memory");
        unsafe {
            let addr = MEMORY_MAPPED_VIEW_ADDRESS { Value: self.base.as_ptr() as *mut _ };
            let _ = UnmapViewOfFile(addr);
            let _ = CloseHandle(self.mapping);
        }
    }
}

// SAFETY: the view is mapped read-only and only read through shared references
unsafe impl Send for SharedMemory {}

/// Convert string to null-terminated wide string for Windows APIs
fn wide_string(s: &str) -> Vec<u16> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
}
