//! Desktop entry (.desktop file) generation.
//!
//! Implements the XDG Desktop Entry Specification.

use super::ShortcutWriter;
use crate::error::{LaunchpinError, Result};
use crate::platform::permissions::set_executable;
use crate::shortcut::ShortcutSpec;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A desktop entry representation.
#[derive(Debug, Clone)]
pub struct DesktopEntry {
    /// Entry name (shown in menus).
    pub name: String,
    /// Comment/description.
    pub comment: Option<String>,
    /// Executable command line.
    pub exec: String,
    /// Icon name or path.
    pub icon: String,
    /// Whether to run in a terminal.
    pub terminal: bool,
    /// Working directory.
    pub path: Option<String>,
    /// Entry type (usually "Application").
    pub entry_type: String,
    /// Categories (semicolon-separated).
    pub categories: Vec<String>,
}

impl Default for DesktopEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            comment: None,
            exec: String::new(),
            icon: String::new(),
            terminal: false,
            path: None,
            entry_type: "Application".to_string(),
            categories: vec!["Utility".to_string()],
        }
    }
}

impl DesktopEntry {
    /// Create a new desktop entry builder.
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::new()
    }

    /// Desktop entry for a resolved shortcut.
    pub fn from_spec(spec: &ShortcutSpec) -> Self {
        let mut exec = vec![quote_exec_arg(&spec.executable_path().to_string_lossy())];
        if let Some(script) = spec.script_path() {
            exec.push(quote_exec_arg(&script.to_string_lossy()));
        }
        // Extra arguments are passed through as the caller wrote them.
        if !spec.arguments().is_empty() {
            exec.push(spec.arguments().replace('%', "%%"));
        }

        DesktopEntry::builder()
            .name(spec.target_name())
            .comment(spec.description())
            .exec(exec.join(" "))
            .icon(spec.icon_path().to_string_lossy())
            .terminal(spec.terminal())
            .path(spec.working_dir().to_string_lossy())
            .build()
    }

    /// Write the desktop entry to a file and mark it executable.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())
            .map_err(|e| LaunchpinError::write_failed(e, path, "write desktop file"))?;

        // Required for desktop files to be trusted
        set_executable(path).map_err(|e| LaunchpinError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
            source: None,
        })?;

        debug!("Wrote desktop entry to {:?}", path);

        Ok(())
    }
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Desktop Entry]")?;
        writeln!(f, "Type={}", self.entry_type)?;
        writeln!(f, "Name={}", escape_value(&self.name))?;

        if let Some(ref comment) = self.comment {
            writeln!(f, "Comment={}", escape_value(comment))?;
        }

        writeln!(f, "Exec={}", escape_value(&self.exec))?;
        writeln!(f, "Icon={}", escape_value(&self.icon))?;
        writeln!(f, "Terminal={}", self.terminal)?;

        if let Some(ref path) = self.path {
            writeln!(f, "Path={}", escape_value(path))?;
        }

        if !self.categories.is_empty() {
            writeln!(f, "Categories={};", self.categories.join(";"))?;
        }

        Ok(())
    }
}

/// Quote one `Exec` argument.
///
/// Arguments with reserved characters are double-quoted, with `"`, `` ` ``,
/// `$` and `\` backslash-escaped inside. `%` is doubled since it introduces
/// field codes.
fn quote_exec_arg(arg: &str) -> String {
    let arg = arg.replace('%', "%%");
    let reserved = |c: char| {
        c.is_whitespace()
            || matches!(
                c,
                '"' | '\'' | '\\' | '>' | '<' | '~' | '|' | '&' | ';' | '$' | '*' | '?' | '#'
                    | '(' | ')' | '`'
            )
    };
    if !arg.contains(reserved) {
        return arg;
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Escape a string value for a key file line.
fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
        .replace('\r', "\\r")
}

/// Builder for desktop entries.
pub struct DesktopEntryBuilder {
    entry: DesktopEntry,
}

impl DesktopEntryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entry: DesktopEntry::default(),
        }
    }

    /// Set the entry name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entry.name = name.into();
        self
    }

    /// Set the comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.entry.comment = Some(comment.into());
        self
    }

    /// Set the executable command.
    pub fn exec(mut self, exec: impl Into<String>) -> Self {
        self.entry.exec = exec.into();
        self
    }

    /// Set the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.entry.icon = icon.into();
        self
    }

    /// Set whether to run in terminal.
    pub fn terminal(mut self, terminal: bool) -> Self {
        self.entry.terminal = terminal;
        self
    }

    /// Set the working directory.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.entry.path = Some(path.into());
        self
    }

    /// Build the desktop entry.
    pub fn build(self) -> DesktopEntry {
        self.entry
    }
}

impl Default for DesktopEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `<name>.desktop` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopEntryWriter;

impl DesktopEntryWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ShortcutWriter for DesktopEntryWriter {
    fn write_shortcut(&self, spec: &ShortcutSpec, destination: &Path) -> Result<PathBuf> {
        let path = destination.join(spec.artifact_file_name("desktop"));
        DesktopEntry::from_spec(spec).write_to_file(&path)?;
        Ok(path)
    }
}
