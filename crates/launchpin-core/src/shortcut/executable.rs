//! Deciding how a shortcut launches its script.
//!
//! A script is normally wrapped by an interpreter. When it is already a
//! platform executable (or a compiled sibling with `.exe` exists) it is run
//! directly instead, with no script argument.

use crate::config::ExecutableConfig;
use crate::platform::paths::native_path;
use crate::platform::Platform;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the shortcut target is invoked. Exactly one form per shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Launch {
    /// `interpreter script`
    Interpreted { interpreter: PathBuf, script: PathBuf },
    /// The target itself is executable.
    Direct { executable: PathBuf },
}

impl Launch {
    pub fn executable_path(&self) -> &Path {
        match self {
            Launch::Interpreted { interpreter, .. } => interpreter,
            Launch::Direct { executable } => executable,
        }
    }

    pub fn script_path(&self) -> Option<&Path> {
        match self {
            Launch::Interpreted { script, .. } => Some(script),
            Launch::Direct { .. } => None,
        }
    }

    /// Script argument passed to the executable; empty when run directly.
    pub fn script_arg(&self) -> String {
        self.script_path()
            .map(|script| script.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Launch::Direct { .. })
    }

    /// The same launch with every path in `platform`'s native format.
    pub fn to_native(&self, platform: Platform) -> Launch {
        match self {
            Launch::Interpreted {
                interpreter,
                script,
            } => Launch::Interpreted {
                interpreter: native_path(platform, interpreter),
                script: native_path(platform, script),
            },
            Launch::Direct { executable } => Launch::Direct {
                executable: native_path(platform, executable),
            },
        }
    }
}

/// Console and windowed variants of the script interpreter.
///
/// GUI shortcuts use the windowed variant so no console window appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    console: PathBuf,
    windowed: PathBuf,
}

impl Interpreter {
    pub fn new(console: impl Into<PathBuf>, windowed: impl Into<PathBuf>) -> Self {
        Self {
            console: console.into(),
            windowed: windowed.into(),
        }
    }

    /// Interpreters inside an installation prefix.
    ///
    /// # Platform Behavior
    /// - **Windows**: `{prefix}\python.exe`, `{prefix}\pythonw.exe`
    /// - **Others**: `{prefix}/bin/python3` for both
    pub fn from_prefix(platform: Platform, prefix: &Path) -> Self {
        if platform.is_windows() {
            Self::new(
                prefix.join(ExecutableConfig::WINDOWS_CONSOLE_INTERPRETER),
                prefix.join(ExecutableConfig::WINDOWS_WINDOWED_INTERPRETER),
            )
        } else {
            let python = prefix.join("bin").join(ExecutableConfig::UNIX_INTERPRETERS[0]);
            Self::new(python.clone(), python)
        }
    }

    /// Find the interpreter on `PATH`.
    ///
    /// Unresolved names are kept bare so a missing interpreter surfaces when
    /// the shortcut is launched, not here.
    pub fn discover(platform: Platform) -> Self {
        if platform.is_windows() {
            let console = find_on_path(&[ExecutableConfig::WINDOWS_CONSOLE_INTERPRETER]);
            let windowed = find_on_path(&[ExecutableConfig::WINDOWS_WINDOWED_INTERPRETER]);
            Self::new(console, windowed)
        } else {
            let python = find_on_path(&ExecutableConfig::UNIX_INTERPRETERS);
            Self::new(python.clone(), python)
        }
    }

    pub fn console(&self) -> &Path {
        &self.console
    }

    pub fn windowed(&self) -> &Path {
        &self.windowed
    }

    pub fn for_terminal(&self, want_terminal: bool) -> &Path {
        if want_terminal {
            &self.console
        } else {
            &self.windowed
        }
    }
}

fn find_on_path(names: &[&str]) -> PathBuf {
    names
        .iter()
        .find_map(|name| match which::which(name) {
            Ok(path) => {
                debug!("Resolved {} to {}", name, path.display());
                Some(path)
            }
            Err(e) => {
                debug!("Failed to resolve {}: {}", name, e);
                None
            }
        })
        .unwrap_or_else(|| PathBuf::from(names[0]))
}

/// Lower-cased executable extensions (with leading dot) for `platform`.
///
/// Windows reads `PATHEXT` (falling back to the stock list); other platforms
/// recognise none.
pub fn executable_extensions(platform: Platform, pathext: Option<&str>) -> Vec<String> {
    if !platform.is_windows() {
        return Vec::new();
    }
    pathext
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(ExecutableConfig::DEFAULT_PATHEXT)
        .split(';')
        .map(|ext| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Chooses between interpreter-wrapped and direct invocation.
#[derive(Debug, Clone)]
pub struct ExecutableSelector {
    platform: Platform,
    interpreter: Interpreter,
    extensions: Vec<String>,
}

impl ExecutableSelector {
    pub fn new(platform: Platform, interpreter: Interpreter, extensions: Vec<String>) -> Self {
        Self {
            platform,
            interpreter,
            extensions,
        }
    }

    /// Decide how to invoke `script_path`.
    ///
    /// Rules, in order:
    /// 1. An explicit executable wraps the script as given.
    /// 2. Otherwise the console or windowed interpreter wraps it.
    /// 3. If the script is missing but `script.exe` exists, run that directly.
    /// 4. If the script's extension is an executable extension, run it directly.
    ///
    /// Never fails; an unlaunchable target is left for the OS to report.
    pub fn select(
        &self,
        script_path: &Path,
        want_terminal: bool,
        explicit_executable: Option<&Path>,
    ) -> Launch {
        let wrapper = explicit_executable
            .unwrap_or_else(|| self.interpreter.for_terminal(want_terminal))
            .to_path_buf();

        if let Some(sibling) = self.compiled_sibling(script_path) {
            debug!("Running {} directly", sibling.display());
            return Launch::Direct {
                executable: sibling,
            };
        }

        if self.has_executable_extension(script_path) {
            debug!("{} is already executable", script_path.display());
            return Launch::Direct {
                executable: script_path.to_path_buf(),
            };
        }

        Launch::Interpreted {
            interpreter: wrapper,
            script: script_path.to_path_buf(),
        }
    }

    /// `script.exe` when the script itself is missing and the sibling exists.
    fn compiled_sibling(&self, script_path: &Path) -> Option<PathBuf> {
        if !self.platform.is_windows() || script_path.exists() {
            return None;
        }
        let mut candidate = OsString::from(script_path.as_os_str());
        candidate.push(ExecutableConfig::WINDOWS_EXE_SUFFIX);
        let candidate = PathBuf::from(candidate);
        candidate.exists().then_some(candidate)
    }

    fn has_executable_extension(&self, script_path: &Path) -> bool {
        match script_path.extension() {
            Some(ext) => {
                let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
                self.extensions.contains(&ext)
            }
            None => false,
        }
    }
}
