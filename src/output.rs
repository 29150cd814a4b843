//! Terminal output formatting for the dexc CLI.
//!
//! Cargo-style status lines with a right-aligned coloured verb, written to
//! stderr. Colour is used only when stderr is a terminal.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::{Severity, ValidationResult};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// e.g. "   Compiling data/pokedex/kanto.json"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Print every diagnostic followed by a one-line tally.
    pub fn diagnostics(&self, result: &ValidationResult) {
        for d in result.iter() {
            let mut line = String::new();
            if let Some(path) = &d.path {
                line.push_str(&display_path(path));
                line.push_str(": ");
            }
            line.push_str(&d.message);
            line.push(' ');
            line.push_str(&self.dim(&format!("[{}]", d.code)));

            match d.severity {
                Severity::Error => self.error("error", &line),
                Severity::Warning => self.warning("warning", &line),
            }
            if let Some(help) = &d.help {
                self.print_line(DIM, "help", help);
            }
        }

        let errors = result.error_count();
        let warnings = result.warning_count();
        let tally = format!(
            "{}, {}",
            plural(errors, "error", "errors"),
            plural(warnings, "warning", "warnings")
        );
        if errors > 0 {
            self.error("Failed", &tally);
        } else {
            self.status("Checked", &tally);
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "sprite", "sprites")` → "1 sprite".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a path relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
