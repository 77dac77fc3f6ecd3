// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Pairs command - exporter/importer columns for graph tools

use super::Session;
use crate::extract::exporter_importer_pairs;
use crate::table::{CsvSink, Table};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for `shipgraph pairs`
#[derive(Debug, Clone, Default, Args)]
pub struct PairsArgs {
    /// Full shipment export
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output CSV
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exporter column (0-based)
    #[arg(long)]
    pub exporter_column: Option<usize>,

    /// Importer column (0-based)
    #[arg(long)]
    pub importer_column: Option<usize>,
}

/// Run the pairs command
pub fn run(session: &Session, args: PairsArgs) -> Result<()> {
    let defaults = &session.config.pairs;
    let input = args.input.unwrap_or_else(|| defaults.input.clone());
    let output = args.output.unwrap_or_else(|| defaults.output.clone());

    let table = Table::read(&input, session.csv)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let pairs = exporter_importer_pairs(
        &table,
        args.exporter_column.unwrap_or(defaults.exporter_column),
        args.importer_column.unwrap_or(defaults.importer_column),
    )?;

    let mut sink = CsvSink::create(&output, session.csv)?;
    sink.header(["exporter", "importer"])?;
    for (exporter, importer) in pairs {
        sink.row([exporter, importer])?;
    }
    let rows = sink.finish()?;

    session.ui.wrote(&output, rows, "pairs");
    Ok(())
}
