//! File permission handling for written shortcut artifacts.

use crate::error::{LaunchpinError, Result};
use std::path::Path;
use tracing::debug;

/// Make a file executable.
///
/// # Platform Behavior
/// - **Linux/macOS**: Sets the executable bit (mode 0o755). Desktop entries
///   must be executable to be trusted by file managers.
/// - **Windows**: No-op (executability is determined by extension)
///
/// # Errors
/// Returns an error if the file doesn't exist or permissions can't be changed.
pub fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata =
            std::fs::metadata(path).map_err(|e| LaunchpinError::io_with_path(e, path))?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| LaunchpinError::io_with_path(e, path))?;
        debug!("Set executable permissions on: {}", path.display());
    }

    #[cfg(not(unix))]
    {
        if !path.exists() {
            return Err(LaunchpinError::io_with_path(
                std::io::Error::from(std::io::ErrorKind::NotFound),
                path,
            ));
        }
        debug!("Skipping executable bit for: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_set_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tool.desktop");
        File::create(&file_path).unwrap();
        let before = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(before & 0o111, 0);

        set_executable(&file_path).unwrap();

        let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_set_executable_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = set_executable(&temp_dir.path().join("missing"));
        assert!(matches!(result, Err(LaunchpinError::Io { .. })));
    }
}
