//! High-level shortcut creation.
//!
//! A request flows through home, special folder, icon and executable
//! resolution into one [`ShortcutSpec`]. Destination folders are then created
//! one at a time and handed to a [`ShortcutWriter`]; a folder that cannot be
//! created does not stop the others.

use super::executable::{executable_extensions, ExecutableSelector, Interpreter};
use super::icon::IconResolver;
use super::request::ShortcutRequest;
use super::spec::{DestinationFolder, DestinationKind, ShortcutSpec};
use crate::config::{ExecutableConfig, IconConfig};
use crate::error::{LaunchpinError, Result};
use crate::platform::paths::{absolutize, native_path, unix_path};
use crate::platform::{
    HomeDirectoryProvider, HomeResolver, Platform, ShellFolderProvider, SpecialFolderProvider,
    SpecialFolderResolver, SystemHomeProvider, UserFolders,
};
use crate::writer::ShortcutWriter;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// What happened at one destination.
#[derive(Debug)]
pub enum DestinationOutcome {
    /// The writer produced `shortcut`.
    Written {
        kind: DestinationKind,
        shortcut: PathBuf,
    },
    /// The destination folder could not be created.
    FolderFailed {
        kind: DestinationKind,
        folder: PathBuf,
        error: LaunchpinError,
    },
    /// The platform has no such folder; expected, not a failure.
    Unsupported {
        kind: DestinationKind,
        platform: Platform,
    },
}

impl DestinationOutcome {
    pub fn kind(&self) -> DestinationKind {
        match self {
            DestinationOutcome::Written { kind, .. }
            | DestinationOutcome::FolderFailed { kind, .. }
            | DestinationOutcome::Unsupported { kind, .. } => *kind,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DestinationOutcome::FolderFailed { .. })
    }
}

/// Result of [`ShortcutMaker::make`].
#[derive(Debug)]
pub struct ShortcutReport {
    pub spec: ShortcutSpec,
    pub outcomes: Vec<DestinationOutcome>,
}

impl ShortcutReport {
    /// True when no requested destination failed.
    pub fn success(&self) -> bool {
        !self.outcomes.iter().any(DestinationOutcome::is_failure)
    }

    /// Paths of the shortcuts that were written.
    pub fn written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                DestinationOutcome::Written { shortcut, .. } => Some(shortcut.as_path()),
                _ => None,
            })
            .collect()
    }
}

/// Create `path` and its parents; an existing directory is success.
///
/// # Errors
/// `FolderCreation` for anything else, including a file in the way.
pub fn ensure_folder(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(LaunchpinError::FolderCreation {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Resolves requests into [`ShortcutSpec`]s and drives a writer.
pub struct ShortcutMaker<H = SystemHomeProvider, F = ShellFolderProvider> {
    platform: Platform,
    homes: HomeResolver<H>,
    folders: SpecialFolderResolver<F>,
    icons: IconResolver,
    interpreter: Interpreter,
}

impl ShortcutMaker<SystemHomeProvider, ShellFolderProvider> {
    /// Maker backed by the real OS and the interpreter found on `PATH`.
    pub fn system(platform: Platform) -> Self {
        Self::new(
            platform,
            SystemHomeProvider,
            ShellFolderProvider,
            Interpreter::discover(platform),
        )
    }
}

impl<H: HomeDirectoryProvider, F: SpecialFolderProvider> ShortcutMaker<H, F> {
    pub fn new(
        platform: Platform,
        home_provider: H,
        folder_provider: F,
        interpreter: Interpreter,
    ) -> Self {
        Self {
            platform,
            homes: HomeResolver::new(platform, home_provider),
            folders: SpecialFolderResolver::new(platform, folder_provider),
            icons: IconResolver::new(platform),
            interpreter,
        }
    }

    /// Replace the interpreter used to wrap scripts.
    pub fn with_interpreter(mut self, interpreter: Interpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolve the current user's folders. Never cached.
    pub fn user_folders(&self) -> Result<UserFolders> {
        let home = self.homes.resolve()?;
        self.folders.resolve(&home)
    }

    /// Resolve `request` without touching the filesystem beyond probes.
    pub fn resolve(&self, request: &ShortcutRequest) -> Result<ShortcutSpec> {
        let folders = self.user_folders()?;

        let (script, arguments) = request.script_and_arguments();
        if script.is_empty() {
            return Err(LaunchpinError::Config {
                message: "Script path is empty".to_string(),
            });
        }
        let cwd = self
            .homes
            .provider()
            .current_dir()
            .unwrap_or_else(|_| folders.home().to_path_buf());
        let script_path = absolutize(self.platform, Path::new(&script), &cwd);
        let subfolder = self.subfolder(request.folder.as_deref())?;

        // Both separators, so a Windows path names the right file on any host.
        let script_name = PathBuf::from(unix_path(&script_path.to_string_lossy()));
        let target_name = request
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                script_name
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| script.clone());
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| target_name.clone());

        let icon_dir = match &request.icon_dir {
            Some(dir) => absolutize(self.platform, dir, &cwd),
            None => IconResolver::bundled_icon_dir()
                .unwrap_or_else(|| cwd.join(IconConfig::ICONS_DIR_NAME)),
        };
        let icon_path = self.icons.resolve(request.icon.as_deref(), &icon_dir);

        let pathext = self.homes.provider().var(ExecutableConfig::PATHEXT_ENV_VAR);
        let selector = ExecutableSelector::new(
            self.platform,
            self.interpreter.clone(),
            executable_extensions(self.platform, pathext.as_deref()),
        );
        let launch = selector
            .select(&script_path, request.terminal, request.executable.as_deref())
            .to_native(self.platform);

        let destinations = self.destinations(request, &folders, subfolder);

        let spec = ShortcutSpec {
            launch,
            arguments,
            target_name,
            description,
            icon_path,
            working_dir: folders.home().to_path_buf(),
            terminal: request.terminal,
            destinations,
        };
        debug!("Resolved shortcut spec for {}", spec.target_name());
        Ok(spec)
    }

    /// The requested subfolder, which must be one plain folder name.
    ///
    /// # Errors
    /// `Config` for separators, `.`/`..`, a drive prefix on Windows, or
    /// anything else that would place the shortcut outside its destination.
    fn subfolder<'a>(&self, folder: Option<&'a str>) -> Result<Option<&'a str>> {
        let Some(folder) = folder.map(str::trim).filter(|folder| !folder.is_empty()) else {
            return Ok(None);
        };

        let has_separator = folder.contains(['/', '\\']);
        let has_drive = self.platform.is_windows() && folder.contains(':');
        let single_component = matches!(
            Path::new(folder).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        );
        if has_separator || has_drive || !single_component {
            return Err(LaunchpinError::Config {
                message: format!("Folder must be a single folder name, got {:?}", folder),
            });
        }
        Ok(Some(folder))
    }

    fn destinations(
        &self,
        request: &ShortcutRequest,
        folders: &UserFolders,
        subfolder: Option<&str>,
    ) -> Vec<DestinationFolder> {
        let place = |base: &Path| {
            let dir = match subfolder {
                Some(sub) => base.join(sub),
                None => base.to_path_buf(),
            };
            native_path(self.platform, &dir)
        };

        let mut destinations = Vec::new();
        if request.desktop {
            destinations.push(DestinationFolder {
                kind: DestinationKind::Desktop,
                path: place(folders.desktop()),
            });
        }
        if request.start_menu {
            match folders.start_menu() {
                Some(start_menu) => destinations.push(DestinationFolder {
                    kind: DestinationKind::StartMenu,
                    path: place(start_menu),
                }),
                None => debug!("No Start Menu on {}", self.platform),
            }
        }
        destinations
    }

    /// Resolve `request`, create each destination folder and write into it.
    ///
    /// # Errors
    /// Resolution errors and writer errors are returned as-is. Folder
    /// creation failures are recorded in the report instead.
    pub fn make(
        &self,
        request: &ShortcutRequest,
        writer: &dyn ShortcutWriter,
    ) -> Result<ShortcutReport> {
        let spec = self.resolve(request)?;
        let mut outcomes = Vec::new();

        for destination in spec.destinations() {
            if let Err(error) = ensure_folder(&destination.path) {
                warn!("Skipping {} shortcut: {}", destination.kind, error);
                outcomes.push(DestinationOutcome::FolderFailed {
                    kind: destination.kind,
                    folder: destination.path.clone(),
                    error,
                });
                continue;
            }

            let shortcut = writer.write_shortcut(&spec, &destination.path)?;
            info!(
                "Created {} shortcut {}",
                destination.kind,
                shortcut.display()
            );
            outcomes.push(DestinationOutcome::Written {
                kind: destination.kind,
                shortcut,
            });
        }

        if request.start_menu && !self.platform.has_start_menu() {
            outcomes.push(DestinationOutcome::Unsupported {
                kind: DestinationKind::StartMenu,
                platform: self.platform,
            });
        }

        Ok(ShortcutReport { spec, outcomes })
    }
}
