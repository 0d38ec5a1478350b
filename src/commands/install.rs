//! Install command implementation
//!
//! Wires the real host and terminal reporter into an install run:
//! 1. Build install options from the arguments
//! 2. Validate every package specifier
//! 3. Install each package in order
//! 4. Fire deferred hooks for the batch

use console::Style;

use crate::cli::InstallArgs;
use crate::error::Result;
use crate::host::SystemHost;
use crate::installer::{InstallContext, InstallOptions};
use crate::operations::install::InstallOperation;
use crate::ui::{ConsoleReporter, Reporter, SilentReporter};

/// Run the install command
pub fn run(args: InstallArgs) -> Result<()> {
    let options = InstallOptions::from(&args);
    tracing::debug!("Install options: {:?}", options);

    let mut host = SystemHost::new(options.root.clone());
    let mut console = ConsoleReporter::new();
    let mut silent = SilentReporter;
    let reporter: &mut dyn Reporter = if args.quiet {
        &mut silent
    } else {
        &mut console
    };

    let ctx = InstallContext::new(&options, &mut host, reporter);
    let summary = InstallOperation::new(ctx).execute(&args.packages)?;

    if !args.quiet {
        println!(
            "{} {} package(s)",
            Style::new().bold().green().apply_to("Installed"),
            summary.packages.len()
        );
    }

    Ok(())
}
