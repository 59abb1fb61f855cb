//! Platform shortcut writers.
//!
//! Each writer serializes a [`ShortcutSpec`] into one native artifact inside
//! an existing destination folder. Writing is idempotent: an artifact with
//! the same name is overwritten.
//!
//! - [`DesktopEntryWriter`] - XDG `.desktop` files (Linux, other Unix)
//! - [`AppBundleWriter`] - minimal `.app` bundles (macOS)
//! - `LnkWriter` - `.lnk` shell links (Windows builds only)

mod app_bundle;
mod desktop_entry;
#[cfg(windows)]
mod shell_link;

pub use app_bundle::AppBundleWriter;
pub use desktop_entry::{DesktopEntry, DesktopEntryBuilder, DesktopEntryWriter};
#[cfg(windows)]
pub use shell_link::LnkWriter;

use crate::error::Result;
use crate::platform::Platform;
use crate::shortcut::ShortcutSpec;
use std::path::{Path, PathBuf};

/// Serializes a shortcut into a destination folder.
pub trait ShortcutWriter {
    /// Write `spec` into `destination` and return the artifact's path.
    ///
    /// # Errors
    /// `Write` on any I/O failure.
    fn write_shortcut(&self, spec: &ShortcutSpec, destination: &Path) -> Result<PathBuf>;
}

/// The writer for `platform`.
///
/// # Errors
/// `Unsupported` when asking for `.lnk` output from a non-Windows build.
pub fn writer_for(platform: Platform) -> Result<Box<dyn ShortcutWriter>> {
    match platform {
        Platform::Linux | Platform::OtherUnix => Ok(Box::new(DesktopEntryWriter::new())),
        Platform::MacOs => Ok(Box::new(AppBundleWriter::new())),
        Platform::Windows => windows_writer(),
    }
}

#[cfg(windows)]
fn windows_writer() -> Result<Box<dyn ShortcutWriter>> {
    Ok(Box::new(LnkWriter::new()))
}

#[cfg(not(windows))]
fn windows_writer() -> Result<Box<dyn ShortcutWriter>> {
    Err(crate::error::LaunchpinError::Unsupported {
        feature: "Writing .lnk shortcuts".to_string(),
        platform: Platform::current().to_string(),
    })
}
