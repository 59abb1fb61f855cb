//! The resolved, writer-facing description of a shortcut.

use super::executable::Launch;
use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a shortcut is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationKind {
    Desktop,
    StartMenu,
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKind::Desktop => f.write_str("Desktop"),
            DestinationKind::StartMenu => f.write_str("Start Menu"),
        }
    }
}

/// A destination folder and the special folder it derives from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationFolder {
    pub kind: DestinationKind,
    pub path: PathBuf,
}

/// Everything a platform writer needs, with native-format absolute paths.
///
/// Built by [`ShortcutMaker`](super::ShortcutMaker) and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutSpec {
    pub(crate) launch: Launch,
    pub(crate) arguments: String,
    pub(crate) target_name: String,
    pub(crate) description: String,
    pub(crate) icon_path: PathBuf,
    pub(crate) working_dir: PathBuf,
    pub(crate) terminal: bool,
    pub(crate) destinations: Vec<DestinationFolder>,
}

impl ShortcutSpec {
    pub fn launch(&self) -> &Launch {
        &self.launch
    }

    pub fn executable_path(&self) -> &Path {
        self.launch.executable_path()
    }

    /// `None` when the target runs directly.
    pub fn script_path(&self) -> Option<&Path> {
        self.launch.script_path()
    }

    /// Extra command-line arguments given after the script.
    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon_path(&self) -> &Path {
        &self.icon_path
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn terminal(&self) -> bool {
        self.terminal
    }

    pub fn destinations(&self) -> &[DestinationFolder] {
        &self.destinations
    }

    /// Destination folders in order: Desktop first, then Start Menu.
    pub fn destination_folders(&self) -> impl Iterator<Item = &Path> {
        self.destinations.iter().map(|dest| dest.path.as_path())
    }

    /// Arguments passed to the executable: the script (quoted when it
    /// contains whitespace) followed by the extra arguments.
    pub fn arguments_line(&self) -> String {
        let script = self
            .launch
            .script_path()
            .map(|script| {
                let script = script.to_string_lossy();
                if script.contains(char::is_whitespace) {
                    format!("\"{}\"", script)
                } else {
                    script.into_owned()
                }
            })
            .unwrap_or_default();

        [script.as_str(), self.arguments.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// File name for the artifact with `extension`, with separators in the
    /// target name replaced.
    pub fn artifact_file_name(&self, extension: &str) -> String {
        let stem: String = self
            .target_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
            .collect();
        format!("{}.{}", stem, extension)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
