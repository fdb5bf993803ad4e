//! Platform detection
//!
//! Every install and uninstall is gated on the running platform: only
//! Windows has a registry to write to. The platform is carried on the
//! [`HostApp`](crate::host::HostApp) so callers and tests can simulate
//! another one.

use serde::{Deserialize, Serialize};

/// Operating system platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows
    Windows,
    /// macOS (Darwin)
    MacOS,
    /// Linux
    Linux,
    /// Unknown/unsupported platform
    Unknown,
}

impl Platform {
    /// Whether shell registrations can be applied on this platform
    pub fn supports_registry(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::MacOS => write!(f, "macOS"),
            Self::Linux => write!(f, "Linux"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Detect the current platform
pub fn detect_platform() -> Platform {
    match std::env::consts::OS {
        "windows" => Platform::Windows,
        "macos" => Platform::MacOS,
        "linux" => Platform::Linux,
        _ => Platform::Unknown,
    }
}
