//! Desktop and Start Menu resolution.
//!
//! Windows asks the shell for the per-user folders. Unix-like platforms derive
//! them from the home directory. macOS has no Start Menu equivalent, which is
//! reported as an absent folder rather than an error.

use super::paths::{desktop_dir, launcher_dir, native_path};
use super::Platform;
use crate::config::FolderConfig;
use crate::error::{LaunchpinError, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-user folders known to the Windows shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpecialFolder {
    Desktop,
    StartMenu,
}

impl SpecialFolder {
    /// Shell special folder id (CSIDL).
    pub fn csidl(&self) -> i32 {
        match self {
            SpecialFolder::Desktop => FolderConfig::CSIDL_DESKTOP,
            SpecialFolder::StartMenu => FolderConfig::CSIDL_STARTMENU,
        }
    }
}

impl fmt::Display for SpecialFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialFolder::Desktop => f.write_str("Desktop"),
            SpecialFolder::StartMenu => f.write_str("Start Menu"),
        }
    }
}

/// Looks up a shell special folder by id.
pub trait SpecialFolderProvider {
    fn special_folder(&self, folder: SpecialFolder) -> Result<PathBuf>;
}

/// Queries the Windows shell namespace. Unsupported on other hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellFolderProvider;

impl SpecialFolderProvider for ShellFolderProvider {
    fn special_folder(&self, folder: SpecialFolder) -> Result<PathBuf> {
        #[cfg(windows)]
        {
            shell_folder_path(folder)
        }

        #[cfg(not(windows))]
        {
            Err(LaunchpinError::Unsupported {
                feature: format!("Shell special folder {}", folder),
                platform: Platform::current().to_string(),
            })
        }
    }
}

#[cfg(windows)]
#[allow(unsafe_code)]
fn shell_folder_path(folder: SpecialFolder) -> Result<PathBuf> {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use windows_sys::Win32::Foundation::MAX_PATH;
    use windows_sys::Win32::UI::Shell::SHGetFolderPathW;

    let mut buffer = [0u16; MAX_PATH as usize];
    // SAFETY: `buffer` holds MAX_PATH UTF-16 units as SHGetFolderPathW
    // requires. Null window and token handles select the calling user.
    let hr = unsafe {
        SHGetFolderPathW(
            std::ptr::null_mut(),
            folder.csidl(),
            std::ptr::null_mut(),
            0,
            buffer.as_mut_ptr(),
        )
    };
    if hr < 0 {
        return Err(LaunchpinError::SpecialFolder {
            folder: folder.to_string(),
            message: format!("SHGetFolderPathW failed with HRESULT {:#010x}", hr),
        });
    }

    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    Ok(PathBuf::from(OsString::from_wide(&buffer[..len])))
}

/// The current user's home, Desktop and Start Menu folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFolders {
    home: PathBuf,
    desktop: PathBuf,
    start_menu: Option<PathBuf>,
}

impl UserFolders {
    pub fn new(home: PathBuf, desktop: PathBuf, start_menu: Option<PathBuf>) -> Self {
        Self {
            home,
            desktop,
            start_menu,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn desktop(&self) -> &Path {
        &self.desktop
    }

    /// `None` where the platform has no Start Menu concept.
    pub fn start_menu(&self) -> Option<&Path> {
        self.start_menu.as_deref()
    }
}

/// Computes [`UserFolders`] from a resolved home directory.
///
/// Nothing is cached: the effective home can change between calls when the
/// elevation context does.
pub struct SpecialFolderResolver<F = ShellFolderProvider> {
    platform: Platform,
    provider: F,
}

impl SpecialFolderResolver<ShellFolderProvider> {
    /// Resolver backed by the real shell.
    pub fn system(platform: Platform) -> Self {
        Self::new(platform, ShellFolderProvider)
    }
}

impl<F: SpecialFolderProvider> SpecialFolderResolver<F> {
    pub fn new(platform: Platform, provider: F) -> Self {
        Self { platform, provider }
    }

    /// Resolve the special folders for `home`.
    ///
    /// # Platform Behavior
    /// - **Windows**: shell folders 0 (Desktop) and 11 (Start Menu)
    /// - **Linux/other Unix**: `{home}/Desktop`, `{home}/.local/share/applications`
    /// - **macOS**: `{home}/Desktop`, no Start Menu
    pub fn resolve(&self, home: &Path) -> Result<UserFolders> {
        let (desktop, start_menu) = match self.platform {
            Platform::Windows => (
                self.provider.special_folder(SpecialFolder::Desktop)?,
                Some(self.provider.special_folder(SpecialFolder::StartMenu)?),
            ),
            Platform::MacOs => (desktop_dir(home), None),
            Platform::Linux | Platform::OtherUnix => (desktop_dir(home), Some(launcher_dir(home))),
        };

        let folders = UserFolders::new(
            native_path(self.platform, home),
            native_path(self.platform, &desktop),
            start_menu.map(|dir| native_path(self.platform, &dir)),
        );
        debug!(
            "Resolved folders on {}: desktop={}, start_menu={:?}",
            self.platform,
            folders.desktop().display(),
            folders.start_menu()
        );
        Ok(folders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeShell {
        calls: Cell<usize>,
    }

    impl FakeShell {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl SpecialFolderProvider for FakeShell {
        fn special_folder(&self, folder: SpecialFolder) -> Result<PathBuf> {
            self.calls.set(self.calls.get() + 1);
            Ok(match folder.csidl() {
                0 => PathBuf::from("C:/Users/bob/Desktop"),
                11 => PathBuf::from("C:/Users/bob/AppData/Roaming/Microsoft/Windows/Start Menu"),
                other => panic!("unexpected CSIDL {}", other),
            })
        }
    }

    struct BrokenShell;

    impl SpecialFolderProvider for BrokenShell {
        fn special_folder(&self, folder: SpecialFolder) -> Result<PathBuf> {
            Err(LaunchpinError::SpecialFolder {
                folder: folder.to_string(),
                message: "shell unavailable".into(),
            })
        }
    }

    #[test]
    fn test_windows_uses_shell_folders() {
        let resolver = SpecialFolderResolver::new(Platform::Windows, FakeShell::new());
        let folders = resolver.resolve(Path::new("C:/Users/bob")).unwrap();

        assert_eq!(folders.home(), Path::new("C:\\Users\\bob"));
        assert_eq!(folders.desktop(), Path::new("C:\\Users\\bob\\Desktop"));
        assert_eq!(
            folders.start_menu(),
            Some(Path::new(
                "C:\\Users\\bob\\AppData\\Roaming\\Microsoft\\Windows\\Start Menu"
            ))
        );
    }

    #[test]
    fn test_windows_shell_failure_is_raised() {
        let resolver = SpecialFolderResolver::new(Platform::Windows, BrokenShell);
        let result = resolver.resolve(Path::new("C:/Users/bob"));
        assert!(matches!(result, Err(LaunchpinError::SpecialFolder { .. })));
    }

    #[test]
    fn test_macos_has_no_start_menu() {
        let shell = FakeShell::new();
        let resolver = SpecialFolderResolver::new(Platform::MacOs, shell);
        let folders = resolver.resolve(Path::new("/Users/alice")).unwrap();

        assert_eq!(folders.desktop(), Path::new("/Users/alice/Desktop"));
        assert_eq!(folders.start_menu(), None);
        assert_eq!(resolver.provider.calls.get(), 0);
    }

    #[test]
    fn test_linux_maps_start_menu_to_launcher_dir() {
        let resolver = SpecialFolderResolver::new(Platform::Linux, FakeShell::new());
        let folders = resolver.resolve(Path::new("/home/alice")).unwrap();

        assert_eq!(folders.desktop(), Path::new("/home/alice/Desktop"));
        assert_eq!(
            folders.start_menu(),
            Some(Path::new("/home/alice/.local/share/applications"))
        );
    }

    #[test]
    fn test_resolution_follows_home_between_calls() {
        let resolver = SpecialFolderResolver::new(Platform::OtherUnix, FakeShell::new());
        let first = resolver.resolve(Path::new("/home/root")).unwrap();
        let second = resolver.resolve(Path::new("/home/bob")).unwrap();

        assert_eq!(first.desktop(), Path::new("/home/root/Desktop"));
        assert_eq!(second.desktop(), Path::new("/home/bob/Desktop"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_shell_provider_unsupported_off_windows() {
        let result = ShellFolderProvider.special_folder(SpecialFolder::Desktop);
        assert!(matches!(result, Err(LaunchpinError::Unsupported { .. })));
    }
}
