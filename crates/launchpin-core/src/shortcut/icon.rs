//! Icon file resolution.
//!
//! The icon encoding is fixed by the native shortcut format, so the extension
//! is chosen by platform and never by the caller. Existence is not checked
//! here; writers decide how to degrade when the file is missing.

use crate::config::IconConfig;
use crate::platform::paths::{absolutize, native_path};
use crate::platform::Platform;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Icon extensions that get swapped rather than appended to.
const KNOWN_ICON_EXTENSIONS: [&str; 2] = [IconConfig::ICO_EXTENSION, IconConfig::ICNS_EXTENSION];

/// Picks the icon file embedded in a shortcut.
#[derive(Debug, Clone, Copy)]
pub struct IconResolver {
    platform: Platform,
}

impl IconResolver {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Directory of icons shipped next to the running binary.
    pub fn bundled_icon_dir() -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.join(IconConfig::ICONS_DIR_NAME))
    }

    /// Resolve `requested` (or the default icon) inside `icon_dir`.
    ///
    /// `icon_dir` is expected to be absolute. A requested icon that is itself
    /// an absolute path ignores `icon_dir`. A trailing `.ico`/`.icns` is
    /// replaced with the platform's extension; anything else gets it appended.
    pub fn resolve(&self, requested: Option<&str>, icon_dir: &Path) -> PathBuf {
        let name = requested
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(IconConfig::DEFAULT_ICON_NAME);
        let extension = self.platform.icon_extension();

        let file = Path::new(name);
        let has_icon_extension = file
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                KNOWN_ICON_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false);

        let file = if has_icon_extension {
            file.with_extension(extension)
        } else {
            PathBuf::from(format!("{}.{}", name, extension))
        };

        let icon = native_path(self.platform, &absolutize(self.platform, &file, icon_dir));
        debug!("Resolved icon: {}", icon.display());
        icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icons() -> PathBuf {
        PathBuf::from("/opt/launchpin/icons")
    }

    #[test]
    fn test_default_icon_on_macos_is_icns() {
        let icon = IconResolver::new(Platform::MacOs).resolve(None, &icons());
        assert_eq!(icon, PathBuf::from("/opt/launchpin/icons/launchpin.icns"));
    }

    #[test]
    fn test_default_icon_elsewhere_is_ico() {
        for platform in [Platform::Windows, Platform::Linux, Platform::OtherUnix] {
            let icon = IconResolver::new(platform).resolve(None, &icons());
            let icon = icon.to_string_lossy().into_owned();
            assert!(icon.ends_with("launchpin.ico"), "{}: {}", platform, icon);
            assert!(!icon.ends_with(".icns"));
        }
    }

    #[test]
    fn test_windows_icon_is_native() {
        let icon = IconResolver::new(Platform::Windows).resolve(Some("tool"), &icons());
        assert_eq!(icon, PathBuf::from("\\opt\\launchpin\\icons\\tool.ico"));
    }

    #[test]
    fn test_requested_icon_extension_is_swapped() {
        let mac = IconResolver::new(Platform::MacOs);
        assert_eq!(
            mac.resolve(Some("tool.ico"), &icons()),
            PathBuf::from("/opt/launchpin/icons/tool.icns")
        );

        let linux = IconResolver::new(Platform::Linux);
        assert_eq!(
            linux.resolve(Some("tool.ICNS"), &icons()),
            PathBuf::from("/opt/launchpin/icons/tool.ico")
        );
    }

    #[test]
    fn test_dotted_name_keeps_its_stem() {
        let icon = IconResolver::new(Platform::Linux).resolve(Some("tool.v2"), &icons());
        assert_eq!(icon, PathBuf::from("/opt/launchpin/icons/tool.v2.ico"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_requested_icon_ignores_search_dir() {
        let icon = IconResolver::new(Platform::Linux).resolve(Some("/srv/art/logo"), &icons());
        assert_eq!(icon, PathBuf::from("/srv/art/logo.ico"));
    }

    #[test]
    fn test_windows_drive_icon_ignores_search_dir() {
        let icon = IconResolver::new(Platform::Windows).resolve(Some("D:/art/logo"), &icons());
        assert_eq!(icon, PathBuf::from("D:\\art\\logo.ico"));
    }

    #[test]
    fn test_blank_request_uses_default() {
        let icon = IconResolver::new(Platform::Linux).resolve(Some("  "), &icons());
        assert!(icon.ends_with("launchpin.ico"));
    }
}
