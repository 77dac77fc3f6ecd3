// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Manifest check command - rows sharing a manifest number across files

use super::Session;
use crate::matching::manifest_matches;
use crate::table::{CsvSink, Table};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for `shipgraph manifest-check`
#[derive(Debug, Clone, Default, Args)]
pub struct ManifestCheckArgs {
    /// Full shipment export
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Match report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Manifest number column (0-based)
    #[arg(long)]
    pub manifest_column: Option<usize>,

    /// Scanned filename column (0-based)
    #[arg(long)]
    pub filename_column: Option<usize>,
}

/// Run the manifest-check command
pub fn run(session: &Session, args: ManifestCheckArgs) -> Result<()> {
    let defaults = &session.config.manifest_check;
    let input = args.input.unwrap_or_else(|| defaults.input.clone());
    let output = args.output.unwrap_or_else(|| defaults.output.clone());

    let table = Table::read(&input, session.csv)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let matches = manifest_matches(
        &table,
        args.manifest_column.unwrap_or(defaults.manifest_column),
        args.filename_column.unwrap_or(defaults.filename_column),
    )?;

    let mut sink = CsvSink::create(&output, session.csv)?;
    sink.header(["manifest #1", "filename1", "manifest #2", "filename2"])?;
    for m in &matches {
        sink.row([m.manifest, m.filename, m.other_manifest, m.other_filename])?;
    }
    let rows = sink.finish()?;

    session.ui.wrote(&output, rows, "matches");
    session.ui.detail("rows scanned", table.len());
    Ok(())
}
