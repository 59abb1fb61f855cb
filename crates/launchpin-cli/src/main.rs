//! launchpin - create Desktop and Start Menu shortcuts for a script.

use anyhow::{bail, Context, Result};
use clap::Parser;
use launchpin::{
    writer_for, DestinationOutcome, Interpreter, Platform, ShortcutMaker, ShortcutRequest,
};
use std::path::PathBuf;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "launchpin")]
#[command(about = "Create desktop and start-menu shortcuts for a script")]
struct Args {
    /// Script to launch, optionally followed by its arguments (quote them together).
    ///
    /// The script path ends at the first space unless it is wrapped in double
    /// quotes, so a path with spaces must be quoted inside the argument:
    /// '"C:\Program Files\tool.py" --fast'
    script: String,

    /// Name shown for the shortcut [default: script file name]
    #[arg(short, long)]
    name: Option<String>,

    /// Longer description [default: name]
    #[arg(short, long)]
    description: Option<String>,

    /// Icon name or path; the platform icon extension is applied
    #[arg(short, long)]
    icon: Option<String>,

    /// Directory searched for the icon [default: icons next to this binary]
    #[arg(long)]
    icon_dir: Option<PathBuf>,

    /// Subfolder of Desktop and Start Menu to place the shortcut in
    #[arg(short, long)]
    folder: Option<String>,

    /// Launch without a terminal window
    #[arg(short, long)]
    gui: bool,

    /// Do not create a Desktop shortcut
    #[arg(long)]
    no_desktop: bool,

    /// Do not create a Start Menu / launcher shortcut
    #[arg(long)]
    no_start_menu: bool,

    /// Executable that runs the script [default: python on PATH]
    #[arg(short, long)]
    executable: Option<PathBuf>,

    /// Installation prefix of the interpreter (overrides PATH lookup)
    #[arg(long)]
    interpreter_prefix: Option<PathBuf>,

    /// Resolve for another platform (windows, macos, linux, other-unix)
    #[arg(long)]
    platform: Option<Platform>,

    /// Print the resolved shortcut as JSON without writing anything
    #[arg(long)]
    print_spec: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn request(&self) -> ShortcutRequest {
        let mut builder = ShortcutRequest::builder(self.script.clone())
            .terminal(!self.gui)
            .desktop(!self.no_desktop)
            .start_menu(!self.no_start_menu);

        if let Some(name) = &self.name {
            builder = builder.name(name);
        }
        if let Some(description) = &self.description {
            builder = builder.description(description);
        }
        if let Some(icon) = &self.icon {
            builder = builder.icon(icon);
        }
        if let Some(icon_dir) = &self.icon_dir {
            builder = builder.icon_dir(icon_dir);
        }
        if let Some(folder) = &self.folder {
            builder = builder.folder(folder);
        }
        if let Some(executable) = &self.executable {
            builder = builder.executable(executable);
        }
        builder.build()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let host = Platform::current();
    let platform = args.platform.unwrap_or(host);

    let mut maker = ShortcutMaker::system(platform);
    if let Some(prefix) = &args.interpreter_prefix {
        maker = maker.with_interpreter(Interpreter::from_prefix(platform, prefix));
    }
    let request = args.request();

    if args.print_spec {
        let spec = maker.resolve(&request).context("Failed to resolve shortcut")?;
        // Intentional stdout: machine-readable output
        println!("{}", spec.to_json_pretty()?);
        return Ok(());
    }

    if platform != host {
        bail!(
            "Refusing to write {} shortcuts on {}; use --print-spec for a dry run",
            platform,
            host
        );
    }

    let writer = writer_for(platform)?;
    let report = maker
        .make(&request, writer.as_ref())
        .context("Failed to create shortcut")?;

    for outcome in &report.outcomes {
        match outcome {
            DestinationOutcome::Written { kind, shortcut } => {
                info!("{}: {}", kind, shortcut.display());
            }
            DestinationOutcome::FolderFailed { kind, folder, error } => {
                error!("{}: could not create {}: {}", kind, folder.display(), error);
            }
            DestinationOutcome::Unsupported { kind, platform } => {
                warn!("{}: not available on {}", kind, platform);
            }
        }
    }

    if !report.success() {
        bail!("Some shortcuts could not be created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_request() {
        let args = Args::try_parse_from([
            "launchpin",
            "tool.py --fast",
            "--name",
            "Tool",
            "-f",
            "MyApps",
            "--gui",
            "--no-start-menu",
        ])
        .unwrap();
        let request = args.request();

        assert_eq!(request.script, "tool.py --fast");
        assert_eq!(request.name.as_deref(), Some("Tool"));
        assert_eq!(request.folder.as_deref(), Some("MyApps"));
        assert!(!request.terminal);
        assert!(request.desktop);
        assert!(!request.start_menu);
    }

    #[test]
    fn test_quoted_script_path_keeps_spaces() {
        let args = Args::try_parse_from([
            "launchpin",
            "\"C:\\Program Files\\tool.py\" --fast",
        ])
        .unwrap();
        let (script, arguments) = args.request().script_and_arguments();

        assert_eq!(script, "C:\\Program Files\\tool.py");
        assert_eq!(arguments, "--fast");
    }

    #[test]
    fn test_platform_flag_parses() {
        let args = Args::try_parse_from(["launchpin", "tool.py", "--platform", "macos"]).unwrap();
        assert_eq!(args.platform, Some(Platform::MacOs));

        assert!(Args::try_parse_from(["launchpin", "tool.py", "--platform", "amiga"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["launchpin", "tool.py"]).unwrap();
        let request = args.request();
        assert!(request.terminal);
        assert!(request.desktop);
        assert!(request.start_menu);
        assert!(!args.print_spec);
    }
}
