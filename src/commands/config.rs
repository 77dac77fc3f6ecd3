// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - show the effective configuration

use super::Session;
use crate::config::{default_path, to_toml};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the config command
///
/// With no action the effective configuration is printed as TOML; `path`
/// prints the config file in use.
pub fn run(session: &Session, action: Option<&str>, explicit: Option<&Path>) -> Result<()> {
    match action {
        None | Some("show") => {
            let rendered = to_toml(&session.config).context("Failed to render configuration")?;
            print!("{rendered}");
        }
        Some("path") => match explicit.map(Path::to_path_buf).or_else(default_path) {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("No configuration directory available on this platform"),
        },
        Some(other) => anyhow::bail!("Unknown action: {}. Valid: show, path", other),
    }
    Ok(())
}
