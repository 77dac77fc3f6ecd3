// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod file_check;
pub mod lookup;
pub mod manifest_check;
pub mod manifests;
pub mod network;
pub mod pairs;

use crate::config::Config;
use crate::table::CsvOptions;
use owo_colors::OwoColorize;
use std::path::Path;

/// Everything a command needs besides its own arguments
#[derive(Debug, Clone)]
pub struct Session {
    /// Effective configuration
    pub config: Config,
    /// CSV dialect for inputs and outputs
    pub csv: CsvOptions,
    /// Terminal reporter
    pub ui: Ui,
}

/// Terminal reporter for user-facing summaries on stdout
#[derive(Debug, Clone, Copy)]
pub struct Ui {
    color: bool,
    quiet: bool,
}

impl Ui {
    /// Create a reporter
    #[must_use]
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    /// Report a written output file
    pub fn wrote(&self, path: &Path, rows: usize, what: &str) {
        if self.quiet {
            return;
        }
        let path = path.display().to_string();
        if self.color {
            println!("{} {} {} to {}", "Wrote".green().bold(), rows, what, path.cyan());
        } else {
            println!("Wrote {rows} {what} to {path}");
        }
    }

    /// Report a secondary detail line
    pub fn detail(&self, label: &str, value: impl std::fmt::Display) {
        if self.quiet {
            return;
        }
        if self.color {
            println!("  {}: {}", label.dimmed(), value);
        } else {
            println!("  {label}: {value}");
        }
    }

    /// Report something the user should notice, on stderr
    pub fn warn(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {}", "Warning:".yellow().bold(), message);
        } else {
            eprintln!("Warning: {message}");
        }
    }
}
