//! Platform abstraction layer.
//!
//! All OS-specific decisions are keyed off an explicit [`Platform`] value that
//! callers inject into each resolver, so every branch can be exercised from a
//! single test binary. The only `#[cfg]` blocks live in the capability
//! providers that actually talk to the OS.
//!
//! # Architecture
//!
//! - `paths` - Native path normalization and per-platform file extensions
//! - `home` - Home directory discovery, including `sudo` elevation
//! - `folders` - Desktop and Start Menu resolution
//! - `permissions` - Executable bits for written artifacts

pub mod folders;
pub mod home;
pub mod paths;
pub mod permissions;

pub use folders::{
    ShellFolderProvider, SpecialFolder, SpecialFolderProvider, SpecialFolderResolver, UserFolders,
};
pub use home::{HomeDirectoryProvider, HomeResolver, SystemHomeProvider};
pub use paths::to_native;
pub use permissions::set_executable;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::IconConfig;
use crate::error::LaunchpinError;

/// Operating system family a shortcut is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    Linux,
    OtherUnix,
}

impl Platform {
    /// The platform this process was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::OtherUnix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::OtherUnix => "other-unix",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// Whether the platform has a per-user Start Menu or launcher directory.
    pub fn has_start_menu(&self) -> bool {
        !matches!(self, Platform::MacOs)
    }

    /// Whether a POSIX user database is available for elevation lookups.
    pub fn has_user_database(&self) -> bool {
        !self.is_windows()
    }

    /// Icon file extension the native shortcut format expects.
    pub fn icon_extension(&self) -> &'static str {
        match self {
            Platform::MacOs => IconConfig::ICNS_EXTENSION,
            _ => IconConfig::ICO_EXTENSION,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = LaunchpinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" | "win32" => Ok(Platform::Windows),
            "macos" | "darwin" | "mac" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            "other-unix" | "unix" | "bsd" => Ok(Platform::OtherUnix),
            other => Err(LaunchpinError::Config {
                message: format!("Unknown platform: {}", other),
            }),
        }
    }
}
