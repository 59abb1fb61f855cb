//! Minimal macOS application bundles.
//!
//! Layout written for a shortcut named `Tool`:
//!
//! ```text
//! Tool.app/Contents/Info.plist
//! Tool.app/Contents/MacOS/Tool          launcher script
//! Tool.app/Contents/Resources/Tool.icns icon, when the source exists
//! Tool.app/Contents/Resources/Tool.command  terminal shortcuts only
//! ```

use super::ShortcutWriter;
use crate::config::ShortcutConfig;
use crate::error::{LaunchpinError, Result};
use crate::platform::permissions::set_executable;
use crate::shortcut::ShortcutSpec;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Writes `<name>.app` bundles.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppBundleWriter;

impl AppBundleWriter {
    pub fn new() -> Self {
        Self
    }

    fn write_file(path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| LaunchpinError::write_failed(e, path, "write file"))
    }

    fn create_dir(path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .map_err(|e| LaunchpinError::write_failed(e, path, "create bundle directory"))
    }

    fn make_executable(path: &Path) -> Result<()> {
        set_executable(path).map_err(|e| LaunchpinError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
            source: None,
        })
    }
}

impl ShortcutWriter for AppBundleWriter {
    fn write_shortcut(&self, spec: &ShortcutSpec, destination: &Path) -> Result<PathBuf> {
        if !destination.is_dir() {
            return Err(LaunchpinError::Write {
                path: destination.to_path_buf(),
                message: "destination folder does not exist".to_string(),
                source: None,
            });
        }

        let bundle = destination.join(spec.artifact_file_name("app"));
        let file_stem = bundle
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| ShortcutConfig::APP_NAME.to_string());
        let contents = bundle.join("Contents");
        let macos = contents.join("MacOS");
        let resources = contents.join("Resources");
        Self::create_dir(&macos)?;
        Self::create_dir(&resources)?;

        let icon_file = format!("{}.icns", file_stem);
        let has_icon = if spec.icon_path().is_file() {
            let target = resources.join(&icon_file);
            fs::copy(spec.icon_path(), &target)
                .map_err(|e| LaunchpinError::write_failed(e, &target, "copy icon"))?;
            true
        } else {
            warn!(
                "Icon {} not found, bundle will use the default icon",
                spec.icon_path().display()
            );
            false
        };

        Self::write_file(
            &contents.join("Info.plist"),
            &info_plist(spec, &file_stem, has_icon.then_some(icon_file.as_str())),
        )?;

        let command = command_line(spec);
        let launcher = macos.join(&file_stem);
        let launcher_body = if spec.terminal() {
            let command_file = resources.join(format!("{}.command", file_stem));
            Self::write_file(&command_file, &shell_script(spec, &command))?;
            Self::make_executable(&command_file)?;
            format!(
                "#!/bin/sh\nexec open -a Terminal \"$(dirname \"$0\")/../Resources/{}.command\"\n",
                file_stem
            )
        } else {
            shell_script(spec, &command)
        };
        Self::write_file(&launcher, &launcher_body)?;
        Self::make_executable(&launcher)?;

        debug!("Wrote app bundle to {:?}", bundle);
        Ok(bundle)
    }
}

/// Single-quote `value` for `/bin/sh`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn command_line(spec: &ShortcutSpec) -> String {
    let mut parts = vec![shell_quote(&spec.executable_path().to_string_lossy())];
    if let Some(script) = spec.script_path() {
        parts.push(shell_quote(&script.to_string_lossy()));
    }
    if !spec.arguments().is_empty() {
        parts.push(spec.arguments().to_string());
    }
    parts.join(" ")
}

fn shell_script(spec: &ShortcutSpec, command: &str) -> String {
    format!(
        "#!/bin/sh\ncd {}\nexec {}\n",
        shell_quote(&spec.working_dir().to_string_lossy()),
        command
    )
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn bundle_identifier(file_stem: &str) -> String {
    let slug: String = file_stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("org.{}.{}", ShortcutConfig::APP_NAME, slug.trim_matches('-'))
}

fn info_plist(spec: &ShortcutSpec, file_stem: &str, icon_file: Option<&str>) -> String {
    let icon_entry = icon_file
        .map(|icon| {
            format!(
                "    <key>CFBundleIconFile</key>\n    <string>{}</string>\n",
                xml_escape(icon)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleName</key>
    <string>{name}</string>
    <key>CFBundleDisplayName</key>
    <string>{name}</string>
    <key>CFBundleGetInfoString</key>
    <string>{description}</string>
    <key>CFBundleExecutable</key>
    <string>{executable}</string>
    <key>CFBundleIdentifier</key>
    <string>{identifier}</string>
    <key>CFBundlePackageType</key>
    <string>APPL</string>
{icon_entry}</dict>
</plist>
"#,
        name = xml_escape(spec.target_name()),
        description = xml_escape(spec.description()),
        executable = xml_escape(file_stem),
        identifier = xml_escape(&bundle_identifier(file_stem)),
        icon_entry = icon_entry,
    )
}
