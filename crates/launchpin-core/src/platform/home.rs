//! Home directory discovery.
//!
//! Resolution order, first success wins:
//! 1. `SUDO_USER` is set: the invoking user's home from the user database
//! 2. `~`, then `HOME`, `HOMEPATH`, `USERPROFILE`, `ALLUSERSPROFILE`
//! 3. The current working directory
//!
//! Every candidate must exist; the result is absolute and native-format.

use super::paths::{absolutize, is_absolute_for, native_path};
use super::Platform;
use crate::config::HomeConfig;
use crate::error::{LaunchpinError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// OS capabilities needed to find a home directory.
pub trait HomeDirectoryProvider {
    /// Read an environment variable.
    fn var(&self, key: &str) -> Option<String>;

    /// Expansion of `~` for the current process.
    fn tilde_home(&self) -> Option<PathBuf>;

    /// Home directory of `username` from the user database.
    fn lookup_user_home(&self, username: &str) -> Option<PathBuf>;

    fn current_dir(&self) -> std::io::Result<PathBuf>;

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Reads the real process environment and user database.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHomeProvider;

impl HomeDirectoryProvider for SystemHomeProvider {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn tilde_home(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn lookup_user_home(&self, username: &str) -> Option<PathBuf> {
        #[cfg(unix)]
        {
            match nix::unistd::User::from_name(username) {
                Ok(Some(user)) => Some(user.dir),
                Ok(None) => {
                    debug!("No user database entry for {}", username);
                    None
                }
                Err(e) => {
                    debug!("User database lookup for {} failed: {}", username, e);
                    None
                }
            }
        }

        #[cfg(not(unix))]
        {
            debug!("No user database to look up {}", username);
            None
        }
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// Resolves the current user's home directory.
///
/// Holds no cached state; every [`resolve`](Self::resolve) re-reads the
/// environment.
pub struct HomeResolver<P = SystemHomeProvider> {
    platform: Platform,
    provider: P,
}

impl HomeResolver<SystemHomeProvider> {
    /// Resolver backed by the real OS.
    pub fn system(platform: Platform) -> Self {
        Self::new(platform, SystemHomeProvider)
    }
}

impl<P: HomeDirectoryProvider> HomeResolver<P> {
    pub fn new(platform: Platform, provider: P) -> Self {
        Self { platform, provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve the home directory.
    ///
    /// # Errors
    /// `HomeNotFound` if no strategy yields an existing path.
    pub fn resolve(&self) -> Result<PathBuf> {
        let cwd = match self.provider.current_dir() {
            Ok(cwd) => Some(cwd),
            Err(e) => {
                debug!("Current directory unavailable: {}", e);
                None
            }
        };

        let home = self
            .elevated_user_home(cwd.as_deref())
            .or_else(|| self.home_from_env(cwd.as_deref()))
            .or_else(|| {
                cwd.filter(|dir| is_absolute_for(self.platform, dir) && self.provider.exists(dir))
            })
            .ok_or(LaunchpinError::HomeNotFound)?;

        let home = native_path(self.platform, &home);
        debug!("Resolved home directory: {}", home.display());
        Ok(home)
    }

    /// Home of the user who invoked `sudo`, not root's.
    fn elevated_user_home(&self, cwd: Option<&Path>) -> Option<PathBuf> {
        if !self.platform.has_user_database() {
            return None;
        }
        let username = self
            .provider
            .var(HomeConfig::ELEVATION_ENV_VAR)
            .filter(|name| !name.trim().is_empty())?;

        debug!("Elevation context detected for user {}", username);
        let home = self.provider.lookup_user_home(username.trim())?;
        self.accept(&home, cwd)
    }

    fn home_from_env(&self, cwd: Option<&Path>) -> Option<PathBuf> {
        if let Some(home) = self.provider.tilde_home() {
            if let Some(home) = self.accept(&home, cwd) {
                return Some(home);
            }
        }

        HomeConfig::HOME_ENV_VARS.iter().find_map(|key| {
            let value = self.provider.var(key).filter(|v| !v.is_empty())?;
            debug!("Probing ${} = {}", key, value);
            self.accept(Path::new(&value), cwd)
        })
    }

    /// Absolutize `candidate` and keep it only if it exists.
    fn accept(&self, candidate: &Path, cwd: Option<&Path>) -> Option<PathBuf> {
        let candidate = if is_absolute_for(self.platform, candidate) {
            candidate.to_path_buf()
        } else {
            absolutize(self.platform, candidate, cwd?)
        };
        self.provider.exists(&candidate).then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeHome {
        vars: HashMap<String, String>,
        tilde: Option<PathBuf>,
        users: HashMap<String, PathBuf>,
        cwd: Option<PathBuf>,
    }

    impl HomeDirectoryProvider for FakeHome {
        fn var(&self, key: &str) -> Option<String> {
            self.vars.get(key).cloned()
        }

        fn tilde_home(&self) -> Option<PathBuf> {
            self.tilde.clone()
        }

        fn lookup_user_home(&self, username: &str) -> Option<PathBuf> {
            self.users.get(username).cloned()
        }

        fn current_dir(&self) -> std::io::Result<PathBuf> {
            self.cwd
                .clone()
                .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
        }
    }

    fn dir(root: &TempDir, name: &str) -> PathBuf {
        let path = root.path().join(name);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn test_sudo_user_resolves_to_invoking_user() {
        let root = TempDir::new().unwrap();
        let bob = dir(&root, "bob");
        let root_home = dir(&root, "root");

        let mut fake = FakeHome::default();
        fake.vars.insert("SUDO_USER".into(), "bob".into());
        fake.vars.insert("HOME".into(), root_home.display().to_string());
        fake.tilde = Some(root_home);
        fake.users.insert("bob".into(), bob.clone());

        let home = HomeResolver::new(Platform::Linux, fake).resolve().unwrap();
        assert_eq!(home, bob);
    }

    #[test]
    fn test_sudo_user_ignored_without_user_database() {
        let root = TempDir::new().unwrap();
        let bob = dir(&root, "bob");
        let admin = dir(&root, "admin");

        let mut fake = FakeHome::default();
        fake.vars.insert("SUDO_USER".into(), "bob".into());
        fake.users.insert("bob".into(), bob);
        fake.tilde = Some(admin.clone());

        let resolver = HomeResolver::new(Platform::Windows, fake);
        let home = resolver.resolve().unwrap();
        assert_eq!(home, native_path(Platform::Windows, &admin));
    }

    #[test]
    fn test_unknown_sudo_user_falls_back_to_env() {
        let root = TempDir::new().unwrap();
        let alice = dir(&root, "alice");

        let mut fake = FakeHome::default();
        fake.vars.insert("SUDO_USER".into(), "ghost".into());
        fake.vars.insert("HOME".into(), alice.display().to_string());

        let home = HomeResolver::new(Platform::Linux, fake).resolve().unwrap();
        assert_eq!(home, alice);
    }

    #[test]
    fn test_env_probe_order_skips_missing_paths() {
        let root = TempDir::new().unwrap();
        let profile = dir(&root, "profile");

        let mut fake = FakeHome::default();
        fake.tilde = Some(root.path().join("does-not-exist"));
        fake.vars.insert("HOME".into(), root.path().join("gone").display().to_string());
        fake.vars.insert("USERPROFILE".into(), profile.display().to_string());
        fake.vars.insert("ALLUSERSPROFILE".into(), root.path().display().to_string());

        let home = HomeResolver::new(Platform::Linux, fake).resolve().unwrap();
        assert_eq!(home, profile);
    }

    #[test]
    fn test_relative_env_home_is_absolutized() {
        let root = TempDir::new().unwrap();
        dir(&root, "rel-home");

        let mut fake = FakeHome::default();
        fake.vars.insert("HOMEPATH".into(), "rel-home".into());
        fake.cwd = Some(root.path().to_path_buf());

        let home = HomeResolver::new(Platform::Linux, fake).resolve().unwrap();
        assert!(home.is_absolute());
        assert_eq!(home, root.path().join("rel-home"));
    }

    #[test]
    fn test_falls_back_to_current_dir() {
        let root = TempDir::new().unwrap();

        let fake = FakeHome {
            cwd: Some(root.path().to_path_buf()),
            ..Default::default()
        };

        let home = HomeResolver::new(Platform::Linux, fake).resolve().unwrap();
        assert_eq!(home, root.path());
    }

    #[test]
    fn test_home_not_found() {
        let mut fake = FakeHome::default();
        fake.vars.insert("HOME".into(), "relative-without-cwd".into());

        let result = HomeResolver::new(Platform::Linux, fake).resolve();
        assert!(matches!(result, Err(LaunchpinError::HomeNotFound)));
    }

    #[test]
    fn test_system_home_is_absolute_and_exists() {
        match HomeResolver::system(Platform::current()).resolve() {
            Ok(home) => {
                assert!(home.is_absolute());
                assert!(home.exists());
            }
            Err(e) => assert!(matches!(e, LaunchpinError::HomeNotFound)),
        }
    }
}
