// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Lookup command - shipments whose waste description contains a term

use super::Session;
use crate::extract::{lookup_output_path, prompt_term, rows_containing, validate_term};
use crate::table::{CsvSink, Table};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `shipgraph lookup`
#[derive(Debug, Clone, Default, Args)]
pub struct LookupArgs {
    /// Waste term to search for (prompted on stdin if omitted)
    pub term: Option<String>,

    /// Full shipment export
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving `<TERM>.csv`
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Waste description column (0-based)
    #[arg(long)]
    pub column: Option<usize>,
}

/// Run the lookup command
pub fn run(session: &Session, args: LookupArgs) -> Result<()> {
    let defaults = &session.config.lookup;
    let input = args.input.unwrap_or_else(|| defaults.input.clone());
    let output_dir = args.output_dir.unwrap_or_else(|| defaults.output_dir.clone());
    let column = args.column.unwrap_or(defaults.column);

    let table = Table::read(&input, session.csv)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let term = match args.term {
        Some(term) => term,
        None => prompt_term(std::io::stdin().lock(), std::io::stdout().lock())?,
    };
    let term = validate_term(&term)?;
    info!("Looking up {:?} in column {}", term, column);

    let matches = rows_containing(&table, column, term)?;

    let output = lookup_output_path(&output_dir, term);
    let mut sink = CsvSink::create(&output, session.csv)?;
    sink.header(["exporter", "importer"])?;
    for record in matches {
        sink.row(record)?;
    }
    let rows = sink.finish()?;

    session.ui.wrote(&output, rows, "shipments");
    Ok(())
}
