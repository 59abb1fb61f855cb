//! Centralized configuration for launchpin.
//!
//! Constants for home discovery, special folders, icons and executable
//! selection. Everything platform-dependent is keyed off [`crate::Platform`]
//! at the call site rather than `cfg!` here.

/// Shortcut-level defaults.
pub struct ShortcutConfig;

impl ShortcutConfig {
    pub const APP_NAME: &'static str = "launchpin";
    /// Desktop folder name under the home directory on Unix-like platforms.
    pub const DESKTOP_DIR_NAME: &'static str = "Desktop";
}

/// Home directory discovery.
pub struct HomeConfig;

impl HomeConfig {
    /// Set by `sudo` to the invoking user's login name.
    pub const ELEVATION_ENV_VAR: &'static str = "SUDO_USER";
    /// Probed in order after `~`.
    pub const HOME_ENV_VARS: [&'static str; 4] =
        ["HOME", "HOMEPATH", "USERPROFILE", "ALLUSERSPROFILE"];
}

/// Special folder locations.
pub struct FolderConfig;

impl FolderConfig {
    /// Shell special folder ids (per-user, not all-users).
    pub const CSIDL_DESKTOP: i32 = 0;
    pub const CSIDL_STARTMENU: i32 = 11;

    /// XDG applications directory relative to the home directory.
    pub const LAUNCHER_DIR_PARTS: [&'static str; 3] = [".local", "share", "applications"];
}

/// Icon defaults.
pub struct IconConfig;

impl IconConfig {
    pub const DEFAULT_ICON_NAME: &'static str = "launchpin";
    pub const ICONS_DIR_NAME: &'static str = "icons";
    pub const ICO_EXTENSION: &'static str = "ico";
    pub const ICNS_EXTENSION: &'static str = "icns";
}

/// Interpreter and executable-extension defaults.
pub struct ExecutableConfig;

impl ExecutableConfig {
    pub const PATHEXT_ENV_VAR: &'static str = "PATHEXT";
    pub const DEFAULT_PATHEXT: &'static str = ".COM;.EXE;.BAT;.CMD";
    /// Appended to a missing script path on Windows before giving up on it.
    pub const WINDOWS_EXE_SUFFIX: &'static str = ".exe";

    pub const WINDOWS_CONSOLE_INTERPRETER: &'static str = "python.exe";
    pub const WINDOWS_WINDOWED_INTERPRETER: &'static str = "pythonw.exe";
    pub const UNIX_INTERPRETERS: [&'static str; 2] = ["python3", "python"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_folder_ids() {
        assert_eq!(FolderConfig::CSIDL_DESKTOP, 0);
        assert_eq!(FolderConfig::CSIDL_STARTMENU, 11);
    }

    #[test]
    fn test_home_probe_order() {
        assert_eq!(HomeConfig::HOME_ENV_VARS[0], "HOME");
        assert_eq!(HomeConfig::HOME_ENV_VARS[3], "ALLUSERSPROFILE");
    }
}
