//! Status reporting for migration and install runs.
//!
//! Printing is a capability passed into the entry points rather than a
//! process-wide singleton, so library callers control where output goes and
//! tests run without touching the terminal.

use colored::Colorize;

/// Receives progress and outcome messages from migration and install runs.
pub trait Reporter {
    fn status(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Colored terminal output. Status/success/warning go to stdout, errors to
/// stderr. `colored` honors `NO_COLOR` and non-tty detection on its own.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn status(&self, message: &str) {
        println!("{} {message}", "→".blue());
    }

    fn success(&self, message: &str) {
        println!("{} {message}", "✓".green().bold());
    }

    fn warning(&self, message: &str) {
        println!("{} {message}", "!".yellow().bold());
    }

    fn error(&self, message: &str) {
        eprintln!("{} {message}", "✗".red().bold());
    }
}

/// Discards all messages. Useful for embedding and for tests.
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn status(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

#[cfg(test)]
pub mod test {
    use super::Reporter;
    use std::cell::RefCell;

    /// Captures every message with its level, for assertions.
    #[derive(Default)]
    pub struct RecordingReporter {
        pub messages: RefCell<Vec<(&'static str, String)>>,
    }

    impl RecordingReporter {
        pub fn contains(&self, level: &str, needle: &str) -> bool {
            self.messages
                .borrow()
                .iter()
                .any(|(l, m)| *l == level && m.contains(needle))
        }
    }

    impl Reporter for RecordingReporter {
        fn status(&self, message: &str) {
            self.messages.borrow_mut().push(("status", message.into()));
        }

        fn success(&self, message: &str) {
            self.messages.borrow_mut().push(("success", message.into()));
        }

        fn warning(&self, message: &str) {
            self.messages.borrow_mut().push(("warning", message.into()));
        }

        fn error(&self, message: &str) {
            self.messages.borrow_mut().push(("error", message.into()));
        }
    }
}
