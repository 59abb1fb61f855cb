//! Windows `.lnk` shell links.

use super::ShortcutWriter;
use crate::error::{LaunchpinError, Result};
use crate::shortcut::ShortcutSpec;
use mslnk::ShellLink;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes `<name>.lnk` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct LnkWriter;

impl LnkWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ShortcutWriter for LnkWriter {
    fn write_shortcut(&self, spec: &ShortcutSpec, destination: &Path) -> Result<PathBuf> {
        let path = destination.join(spec.artifact_file_name("lnk"));
        let write_error = |message: String| LaunchpinError::Write {
            path: path.clone(),
            message,
            source: None,
        };

        let mut link = ShellLink::new(spec.executable_path())
            .map_err(|e| write_error(format!("link target: {}", e)))?;

        let arguments = spec.arguments_line();
        if !arguments.is_empty() {
            link.set_arguments(Some(arguments));
        }
        link.set_working_dir(Some(spec.working_dir().to_string_lossy().into_owned()));
        link.set_name(Some(spec.description().to_string()));
        link.set_icon_location(Some(spec.icon_path().to_string_lossy().into_owned()));

        link.create_lnk(&path)
            .map_err(|e| write_error(format!("create link: {}", e)))?;

        debug!("Wrote shell link to {:?}", path);
        Ok(path)
    }
}
