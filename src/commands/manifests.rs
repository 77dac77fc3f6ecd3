// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Manifests command - attach EPA ID numbers to scanned manifest files

use super::Session;
use crate::matching::match_filenames;
use crate::table::{CsvSink, Table};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for `shipgraph manifests`
#[derive(Debug, Clone, Default, Args)]
pub struct ManifestsArgs {
    /// Scanned file inventory (filename in column 0)
    #[arg(long)]
    pub files: Option<PathBuf>,

    /// EPA ID table (ID in column 0, filename without extension in column 1)
    #[arg(long)]
    pub ids: Option<PathBuf>,

    /// Joined result
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the manifests command
pub fn run(session: &Session, args: ManifestsArgs) -> Result<()> {
    let defaults = &session.config.manifests;
    let files_path = args.files.unwrap_or_else(|| defaults.files.clone());
    let ids_path = args.ids.unwrap_or_else(|| defaults.ids.clone());
    let output = args.output.unwrap_or_else(|| defaults.output.clone());

    let files = Table::read(&files_path, session.csv)
        .with_context(|| format!("Failed to load {}", files_path.display()))?;
    let ids = Table::read(&ids_path, session.csv)
        .with_context(|| format!("Failed to load {}", ids_path.display()))?;

    let matches = match_filenames(&files, &ids)?;

    let mut sink = CsvSink::create(&output, session.csv)?;
    sink.header(["epaNumber", "year", "filename", "fileOpener"])?;
    for m in &matches {
        let year = m.year.to_string();
        sink.row([m.epa_number, year.as_str(), m.filename, ""])?;
    }
    let rows = sink.finish()?;

    session.ui.wrote(&output, rows, "manifests");
    if rows < files.len() {
        session.ui.detail("unmatched files", files.len() - rows);
    }
    Ok(())
}
