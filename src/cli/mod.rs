//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};

pub mod completions;
pub mod install;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;

/// Guru - package installer
///
/// Installs self-describing packages: files, system dependencies, accounts and manual pages.
#[derive(Parser, Debug)]
#[command(
    name = "guru",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Installer for self-describing Guru packages",
    long_about = "Guru installs package directories onto this host: it copies bin/, lib/, share/ \
                  and fs/ trees, installs system dependencies, creates the groups and users a \
                  package declares and registers its manual pages.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  guru install                         \x1b[90m# Install the package in the current directory\x1b[0m\n   \
                  guru install ./base ./webapp         \x1b[90m# Install two packages in order\x1b[0m\n   \
                  guru install ./tool -p /opt/tool     \x1b[90m# Install under another prefix\x1b[0m\n"
)]
pub struct Cli {
    /// When to use colored output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto, env = "GURU_COLOR")]
    pub color: ColorMode,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output control
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a terminal
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Apply the choice to stdout and stderr styling
    pub fn apply(self) {
        match self {
            ColorMode::Auto => {}
            ColorMode::Always | ColorMode::Never => {
                let enabled = self == ColorMode::Always;
                console::set_colors_enabled(enabled);
                console::set_colors_enabled_stderr(enabled);
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install packages from local directories
    Install(InstallArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
