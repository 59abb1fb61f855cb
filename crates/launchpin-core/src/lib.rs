//! launchpin - cross-platform shortcut resolution for scripts.
//!
//! Given a script path and optional metadata, resolves the user's home,
//! Desktop and Start Menu folders, the icon file and how the script is
//! launched, producing a [`ShortcutSpec`] that a platform [`ShortcutWriter`]
//! turns into a `.desktop` file, `.app` bundle or `.lnk` link.
//!
//! Every resolver takes an explicit [`Platform`] and its OS capabilities
//! through provider traits, so all platform branches are testable anywhere.

pub mod config;
pub mod error;
pub mod platform;
pub mod shortcut;
pub mod writer;

pub use error::{LaunchpinError, Result};
pub use platform::{
    to_native, HomeDirectoryProvider, HomeResolver, Platform, ShellFolderProvider, SpecialFolder,
    SpecialFolderProvider, SpecialFolderResolver, SystemHomeProvider, UserFolders,
};
pub use shortcut::{
    ensure_folder, DestinationFolder, DestinationKind, DestinationOutcome, ExecutableSelector,
    IconResolver, Interpreter, Launch, ShortcutMaker, ShortcutReport, ShortcutRequest,
    ShortcutSpec,
};
pub use writer::{writer_for, AppBundleWriter, DesktopEntryWriter, ShortcutWriter};
