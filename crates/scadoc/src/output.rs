//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Status messages go to stderr; emitted markup fragments go to stdout
/// so they can be piped into a build.
pub struct Output {
    term: Term,
    term_out: Term,
    green: Style,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            term_out: Term::stdout(),
            green: Style::new().green(),
            red: Style::new().red(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a result fragment on stdout.
    pub fn emit(&self, msg: &str) {
        let _ = self.term_out.write_line(msg);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
