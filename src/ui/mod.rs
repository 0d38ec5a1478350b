//! Status output for install runs
//!
//! All user-facing progress goes through the [`Reporter`] trait, allowing
//! different implementations based on command-line flags:
//! - [`ConsoleReporter`] prints one styled line per event
//! - [`SilentReporter`] discards everything (`--quiet`)

use console::Style;

/// Receiver of install progress events
pub trait Reporter {
    /// A package's stage sequence is starting
    fn package(&mut self, name: &str, current: usize, total: usize);

    /// A stage did something
    fn status(&mut self, stage: &str, message: &str);

    /// A stage, or one record within it, was skipped
    fn skipped(&mut self, stage: &str, message: &str);

    /// Something was ignored but the run continues
    fn warning(&mut self, stage: &str, message: &str);

    /// Deferred hooks ran
    fn hook(&mut self, name: &str);
}

/// Reporter printing styled lines to the terminal
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    fn label(stage: &str) -> String {
        format!("{:>8}", stage)
    }
}

impl Reporter for ConsoleReporter {
    fn package(&mut self, name: &str, current: usize, total: usize) {
        println!(
            "{} {}",
            Style::new()
                .bold()
                .green()
                .apply_to(format!("({}/{}) Installing", current, total)),
            Style::new().bold().apply_to(name)
        );
    }

    fn status(&mut self, stage: &str, message: &str) {
        println!(
            "{} {}",
            Style::new().bold().cyan().apply_to(Self::label(stage)),
            message
        );
    }

    fn skipped(&mut self, stage: &str, message: &str) {
        println!(
            "{} {}",
            Style::new().dim().apply_to(Self::label(stage)),
            Style::new().dim().apply_to(message)
        );
    }

    fn warning(&mut self, stage: &str, message: &str) {
        eprintln!(
            "{} {}",
            Style::new().bold().yellow().apply_to(Self::label(stage)),
            Style::new().yellow().apply_to(message)
        );
    }

    fn hook(&mut self, name: &str) {
        println!(
            "{} ran deferred hook",
            Style::new().bold().magenta().apply_to(Self::label(name))
        );
    }
}

/// Silent reporter for quiet mode
///
/// No-op implementation that does not display anything.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn package(&mut self, _name: &str, _current: usize, _total: usize) {}

    fn status(&mut self, _stage: &str, _message: &str) {}

    fn skipped(&mut self, _stage: &str, _message: &str) {}

    fn warning(&mut self, _stage: &str, _message: &str) {}

    fn hook(&mut self, _name: &str) {}
}
