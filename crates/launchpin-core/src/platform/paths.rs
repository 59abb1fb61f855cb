//! Platform-specific path utilities.
//!
//! This module provides:
//! - Delimiter normalization for the target platform
//! - Absolutizing paths against an injected working directory
//! - Per-user Desktop and launcher directory layout on Unix-like platforms

use super::Platform;
use crate::config::{FolderConfig, ShortcutConfig};
use std::path::{Path, PathBuf};

/// Convert backslashes to forward slashes.
pub fn unix_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert to Windows delimiters.
///
/// A path beginning with a doubled forward slash (a concatenation artifact)
/// loses one of them before the conversion.
pub fn win_path(path: &str) -> String {
    let path = path.strip_prefix('/').filter(|rest| rest.starts_with('/')).unwrap_or(path);
    path.replace('/', "\\")
}

/// Normalize `path` to the delimiter convention of `platform`.
///
/// Pure and total; `to_native(p, to_native(p, s)) == to_native(p, s)`.
pub fn to_native(platform: Platform, path: &str) -> String {
    match platform {
        Platform::Windows => win_path(path),
        Platform::MacOs | Platform::Linux | Platform::OtherUnix => unix_path(path),
    }
}

/// [`to_native`] for a [`Path`].
pub fn native_path(platform: Platform, path: &Path) -> PathBuf {
    PathBuf::from(to_native(platform, &path.to_string_lossy()))
}

/// Whether `path` is absolute for `platform`, regardless of the host.
///
/// Windows accepts drive roots (`C:\`, `C:/`) and UNC prefixes; other
/// platforms a leading `/`. A path the host itself considers absolute is
/// always accepted, since that is all the host filesystem can hand back.
pub fn is_absolute_for(platform: Platform, path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }
    let path = path.to_string_lossy();
    match platform {
        Platform::Windows => {
            let bytes = path.as_bytes();
            let drive_root = bytes.len() >= 3
                && bytes[0].is_ascii_alphabetic()
                && bytes[1] == b':'
                && matches!(bytes[2], b'\\' | b'/');
            let unc = path.starts_with("\\\\") || path.starts_with("//");
            drive_root || unc
        }
        Platform::MacOs | Platform::Linux | Platform::OtherUnix => path.starts_with('/'),
    }
}

/// Join a relative `path` onto `cwd`; paths absolute for `platform` are
/// returned unchanged.
pub fn absolutize(platform: Platform, path: &Path, cwd: &Path) -> PathBuf {
    if is_absolute_for(platform, path) {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the user's desktop directory under `home`.
///
/// # Platform Behavior
/// - **Linux/macOS/other Unix**: `{home}/Desktop`
/// - **Windows**: resolved through the shell instead, see `folders`
pub fn desktop_dir(home: &Path) -> PathBuf {
    home.join(ShortcutConfig::DESKTOP_DIR_NAME)
}

/// Get the XDG applications directory under `home`.
///
/// `{home}/.local/share/applications`
pub fn launcher_dir(home: &Path) -> PathBuf {
    FolderConfig::LAUNCHER_DIR_PARTS
        .iter()
        .fold(home.to_path_buf(), |dir, part| dir.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Platform; 4] = [
        Platform::Windows,
        Platform::MacOs,
        Platform::Linux,
        Platform::OtherUnix,
    ];

    #[test]
    fn test_win_path() {
        assert_eq!(win_path("C:/Users/bob/Desktop"), "C:\\Users\\bob\\Desktop");
        assert_eq!(win_path("//server/share"), "\\server\\share");
        assert_eq!(win_path("/Users/bob"), "\\Users\\bob");
        assert_eq!(win_path("C:\\already\\native"), "C:\\already\\native");
    }

    #[test]
    fn test_unix_path() {
        assert_eq!(unix_path("home\\alice\\tool.py"), "home/alice/tool.py");
        assert_eq!(unix_path("/home/alice"), "/home/alice");
    }

    #[test]
    fn test_to_native_is_idempotent() {
        let samples = [
            "",
            "/",
            "//",
            "///triple/slash",
            "//server/share/dir",
            "C:\\Users\\bob\\Start Menu",
            "C:/mixed\\separators/here",
            "\\\\unc\\path",
            "relative/path\\file.py",
        ];
        for platform in ALL {
            for sample in samples {
                let once = to_native(platform, sample);
                let twice = to_native(platform, &once);
                assert_eq!(once, twice, "{} not idempotent for {:?}", platform, sample);
            }
        }
    }

    #[test]
    fn test_to_native_never_mixes_separators() {
        let mixed = "C:/mixed\\separators/here";
        assert!(!to_native(Platform::Windows, mixed).contains('/'));
        assert!(!to_native(Platform::Linux, mixed).contains('\\'));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolutize() {
        let cwd = Path::new("/work");
        assert_eq!(
            absolutize(Platform::Linux, Path::new("tool.py"), cwd),
            PathBuf::from("/work/tool.py")
        );
        assert_eq!(
            absolutize(Platform::Linux, Path::new("/abs/tool.py"), cwd),
            PathBuf::from("/abs/tool.py")
        );
    }

    #[test]
    fn test_windows_drive_and_unc_paths_are_absolute_on_any_host() {
        let paths = [
            "C:/Users/bob/tool.py",
            "c:\\tools\\run.bat",
            "\\\\srv\\share\\x",
            "//srv/share/x",
        ];
        for path in paths {
            assert!(is_absolute_for(Platform::Windows, Path::new(path)), "{}", path);
            assert_eq!(
                absolutize(Platform::Windows, Path::new(path), Path::new("/work")),
                PathBuf::from(path)
            );
        }
        assert!(!is_absolute_for(Platform::Windows, Path::new("C:relative")));
        assert!(!is_absolute_for(Platform::Windows, Path::new("tools\\run.bat")));
    }

    #[test]
    fn test_drive_path_is_relative_for_unix_targets() {
        #[cfg(unix)]
        assert!(!is_absolute_for(Platform::Linux, Path::new("C:/Users/bob")));
        assert!(is_absolute_for(Platform::MacOs, Path::new("/Users/alice")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_folder_layout() {
        let home = Path::new("/home/alice");
        assert_eq!(desktop_dir(home), PathBuf::from("/home/alice/Desktop"));
        assert_eq!(
            launcher_dir(home),
            PathBuf::from("/home/alice/.local/share/applications")
        );
    }
}
