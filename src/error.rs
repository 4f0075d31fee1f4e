//! Error types for the radar engine and its host.
//!
//! Only configuration, platform and persistence problems are errors here. Missing or
//! malformed telemetry is never an error: providers fold it into a disconnected snapshot and
//! the engine answers such snapshots with an empty result.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: Invalid engine capacity or host settings
//! - **Connection Errors**: Failures opening the simulator's telemetry source
//! - **Platform Errors**: Live telemetry requested on an unsupported platform
//! - **Settings Errors**: Problems reading or writing persisted overlay settings
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use overlap::RadarError;
//!
//! let error = RadarError::connection_failed("iRacing not running");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[cfg(windows)]
use windows_core as core;

/// Result type alias for radar operations.
pub type Result<T, E = RadarError> = std::result::Result<T, E>;

/// Main error type for radar operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RadarError {
    #[error("Maximum tracked cars must be positive, got {requested}")]
    InvalidCapacity { requested: usize },

    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Failed to open telemetry source: {reason}")]
    Connection {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("SDK version mismatch: expected {expected}, found {found}")]
    Version { expected: u32, found: u32 },

    #[error("{feature} is only available on {required_platform}")]
    UnsupportedPlatform { feature: String, required_platform: String },

    #[error("Windows API error: {operation}")]
    #[cfg(windows)]
    WindowsApi {
        operation: String,
        #[source]
        source: core::Error,
    },

    #[error("Settings file error: {path}")]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed settings in {path}")]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Radar host task failed: {reason}")]
    HostTask { reason: String },
}

impl RadarError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            RadarError::Connection { .. } => true,
            RadarError::Settings { .. } => true,
            RadarError::InvalidCapacity { .. } => false,
            RadarError::InvalidConfig { .. } => false,
            RadarError::Version { .. } => false,
            RadarError::UnsupportedPlatform { .. } => false,
            #[cfg(windows)]
            RadarError::WindowsApi { .. } => true,
            RadarError::SettingsFormat { .. } => false,
            RadarError::HostTask { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            RadarError::InvalidCapacity { .. } => {
                vec!["Track at least one car", "Use the default of 6 tracked cars"]
            }
            RadarError::InvalidConfig { .. } => vec![
                "Check the value against the documented range",
                "Remove the option to fall back to its default",
            ],
            RadarError::Connection { .. } => vec![
                "Ensure iRacing is running",
                "Check Windows permissions for shared memory access",
                "Use the mock provider while developing",
            ],
            RadarError::Version { .. } => vec![
                "Update iRacing to latest version",
                "Update this library to a compatible version",
            ],
            RadarError::UnsupportedPlatform { .. } => vec![
                "Use the mock provider on this platform",
                "Run the overlay on Windows for live telemetry",
            ],
            #[cfg(windows)]
            RadarError::WindowsApi { .. } => vec![
                "Check Windows API permissions",
                "Verify iRacing is running in the same user session",
            ],
            RadarError::Settings { .. } => vec![
                "Check the settings directory exists and is writable",
                "Check file permissions",
            ],
            RadarError::SettingsFormat { .. } => vec![
                "Delete the settings file to restore defaults",
                "Check the file is valid JSON",
            ],
            RadarError::HostTask { .. } => {
                vec!["Restart the radar connection", "Check the log for a provider panic"]
            }
        }
    }

    /// Helper constructor for a rejected engine capacity.
    pub fn invalid_capacity(requested: usize) -> Self {
        RadarError::InvalidCapacity { requested }
    }

    /// Helper constructor for configuration errors.
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RadarError::InvalidConfig { field: field.into(), reason: reason.into() }
    }

    /// Helper constructor for connection errors.
    pub fn connection_failed(reason: impl Into<String>) -> Self {
        RadarError::Connection { reason: reason.into(), source: None }
    }

    /// Helper constructor for connection errors with source.
    pub fn connection_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        RadarError::Connection { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for Windows API errors.
    #[cfg(windows)]
    pub fn windows_api_error(operation: impl Into<String>, source: core::Error) -> Self {
        RadarError::WindowsApi { operation: operation.into(), source }
    }

    /// Helper constructor for settings file errors with path context.
    pub fn settings_error(path: PathBuf, source: std::io::Error) -> Self {
        RadarError::Settings { path, source }
    }

    /// Helper constructor for unsupported platform errors.
    pub fn unsupported_platform(
        feature: impl Into<String>,
        required_platform: impl Into<String>,
    ) -> Self {
        RadarError::UnsupportedPlatform {
            feature: feature.into(),
            required_platform: required_platform.into(),
        }
    }
}

impl From<std::io::Error> for RadarError {
    fn from(err: std::io::Error) -> Self {
        RadarError::Settings { path: PathBuf::from("<unknown>"), source: err }
    }
}

#[cfg(windows)]
impl From<core::Error> for RadarError {
    fn from(err: core::Error) -> Self {
        RadarError::WindowsApi { operation: "Unknown Windows operation".to_string(), source: err }
    }
}
