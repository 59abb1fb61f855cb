//! Shortcut requests as supplied by callers.

use std::path::{Path, PathBuf};

/// What the caller asked for, before any platform resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRequest {
    /// Script path, optionally followed by command-line arguments.
    pub script: String,
    /// Display name. Defaults to the script's file stem.
    pub name: Option<String>,
    /// Longer description. Defaults to the name.
    pub description: Option<String>,
    /// Icon name or path, without a required extension.
    pub icon: Option<String>,
    /// Directory searched for `icon`.
    pub icon_dir: Option<PathBuf>,
    /// Subfolder of Desktop and Start Menu to place the shortcut in.
    pub folder: Option<String>,
    /// Run in a terminal (console interpreter) or not (windowed).
    pub terminal: bool,
    pub desktop: bool,
    pub start_menu: bool,
    /// Executable used instead of the discovered interpreter.
    pub executable: Option<PathBuf>,
}

impl ShortcutRequest {
    /// Create a request builder for `script`.
    pub fn builder(script: impl Into<String>) -> ShortcutRequestBuilder {
        ShortcutRequestBuilder::new(script)
    }

    /// Split [`script`](Self::script) into the script path and its arguments.
    pub fn script_and_arguments(&self) -> (String, String) {
        split_command(&self.script)
    }
}

/// Split a command line into its first token and the remainder.
///
/// The first token may be double-quoted to contain spaces; unquoted, it ends
/// at the first whitespace, so `C:\Program Files\tool.py` must be written as
/// `"C:\Program Files\tool.py"`. The remainder is returned trimmed and
/// otherwise untouched.
pub fn split_command(command: &str) -> (String, String) {
    let command = command.trim();

    if let Some(rest) = command.strip_prefix('"') {
        if let Some(end) = rest.find('"') {
            return (rest[..end].to_string(), rest[end + 1..].trim().to_string());
        }
        return (rest.to_string(), String::new());
    }

    match command.split_once(char::is_whitespace) {
        Some((script, args)) => (script.to_string(), args.trim().to_string()),
        None => (command.to_string(), String::new()),
    }
}

/// Builder for [`ShortcutRequest`].
pub struct ShortcutRequestBuilder {
    request: ShortcutRequest,
}

impl ShortcutRequestBuilder {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            request: ShortcutRequest {
                script: script.into(),
                name: None,
                description: None,
                icon: None,
                icon_dir: None,
                folder: None,
                terminal: true,
                desktop: true,
                start_menu: true,
                executable: None,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.request.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.request.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.request.icon = Some(icon.into());
        self
    }

    pub fn icon_dir(mut self, icon_dir: impl AsRef<Path>) -> Self {
        self.request.icon_dir = Some(icon_dir.as_ref().to_path_buf());
        self
    }

    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.request.folder = Some(folder.into());
        self
    }

    pub fn terminal(mut self, terminal: bool) -> Self {
        self.request.terminal = terminal;
        self
    }

    pub fn desktop(mut self, desktop: bool) -> Self {
        self.request.desktop = desktop;
        self
    }

    pub fn start_menu(mut self, start_menu: bool) -> Self {
        self.request.start_menu = start_menu;
        self
    }

    pub fn executable(mut self, executable: impl AsRef<Path>) -> Self {
        self.request.executable = Some(executable.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> ShortcutRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = ShortcutRequest::builder("tool.py").build();
        assert!(request.terminal);
        assert!(request.desktop);
        assert!(request.start_menu);
        assert_eq!(request.name, None);
        assert_eq!(request.folder, None);
    }

    #[test]
    fn test_builder_sets_fields() {
        let request = ShortcutRequest::builder("tool.py --fast")
            .name("Tool")
            .folder("MyApps")
            .terminal(false)
            .start_menu(false)
            .executable("/usr/bin/pypy3")
            .build();

        assert_eq!(request.name.as_deref(), Some("Tool"));
        assert_eq!(request.folder.as_deref(), Some("MyApps"));
        assert!(!request.terminal);
        assert!(!request.start_menu);
        assert_eq!(request.executable, Some(PathBuf::from("/usr/bin/pypy3")));
    }

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("tool.py"), ("tool.py".into(), String::new()));
        assert_eq!(
            split_command("  tool.py --port 8080  "),
            ("tool.py".into(), "--port 8080".into())
        );
        assert_eq!(
            split_command("\"My Tools/tool.py\" -v"),
            ("My Tools/tool.py".into(), "-v".into())
        );
        assert_eq!(
            split_command("C:\\Program Files\\tool.py"),
            ("C:\\Program".into(), "Files\\tool.py".into())
        );
        assert_eq!(
            split_command("\"C:\\Program Files\\tool.py\" --fast"),
            ("C:\\Program Files\\tool.py".into(), "--fast".into())
        );
        assert_eq!(
            split_command("\"unterminated path"),
            ("unterminated path".into(), String::new())
        );
    }
}
