//! Shortcut resolution and creation.
//!
//! Provides:
//! - Icon file resolution with the platform's icon extension
//! - Interpreter-wrapped vs. direct executable selection
//! - The [`ShortcutSpec`] model handed to writers
//! - [`ShortcutMaker`], which ties resolution, folder creation and writing
//!
//! # Example
//!
//! ```rust,no_run
//! use launchpin::{writer_for, Platform, ShortcutMaker, ShortcutRequest};
//!
//! fn main() -> launchpin::Result<()> {
//!     let platform = Platform::current();
//!     let maker = ShortcutMaker::system(platform);
//!     let request = ShortcutRequest::builder("/home/alice/tool.py --fast")
//!         .folder("MyApps")
//!         .build();
//!
//!     let report = maker.make(&request, writer_for(platform)?.as_ref())?;
//!     for shortcut in report.written() {
//!         println!("Created {}", shortcut.display());
//!     }
//!     Ok(())
//! }
//! ```

mod executable;
mod icon;
mod manager;
mod request;
mod spec;

pub use executable::{executable_extensions, ExecutableSelector, Interpreter, Launch};
pub use icon::IconResolver;
pub use manager::{ensure_folder, DestinationOutcome, ShortcutMaker, ShortcutReport};
pub use request::{split_command, ShortcutRequest, ShortcutRequestBuilder};
pub use spec::{DestinationFolder, DestinationKind, ShortcutSpec};
