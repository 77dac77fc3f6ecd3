// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! File check command - inventory scanned manifests and flag uncatalogued ones

use super::Session;
use crate::inventory::{listed_filenames, scan, unlisted, InventoryConfig};
use crate::table::{CsvSink, Table};
use crate::types::InventoryEntry;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Arguments for `shipgraph file-check`
#[derive(Debug, Clone, Default, Args)]
pub struct FileCheckArgs {
    /// Directory tree of scanned documents
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Existing catalogue (filename without extension in column 1)
    #[arg(short, long)]
    pub listing: Option<PathBuf>,

    /// Full inventory output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output for files absent from the catalogue
    #[arg(short, long)]
    pub missing: Option<PathBuf>,

    /// Only list files matching this glob
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_symlinks: bool,
}

/// Run the file-check command
pub fn run(session: &Session, args: FileCheckArgs) -> Result<()> {
    let defaults = &session.config.file_check;
    let root = args.root.unwrap_or_else(|| defaults.root.clone());
    let listing = args.listing.unwrap_or_else(|| defaults.listing.clone());
    let output = args.output.unwrap_or_else(|| defaults.output.clone());
    let missing = args.missing.unwrap_or_else(|| defaults.missing.clone());

    let config = InventoryConfig {
        pattern: args.pattern.unwrap_or_else(|| defaults.pattern.clone()),
        follow_symlinks: args.follow_symlinks,
    };

    let entries = scan(&root, &config)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let rows = write_entries(&output, session, true, entries.iter())?;
    session.ui.wrote(&output, rows, "files");

    if listing.exists() {
        let table = Table::read(&listing, session.csv)
            .with_context(|| format!("Failed to load {}", listing.display()))?;
        let listed = listed_filenames(&table)?;
        let absent = unlisted(&entries, &listed);
        let rows = write_entries(&missing, session, false, absent.into_iter())?;
        session.ui.wrote(&missing, rows, "uncatalogued files");
    } else {
        warn!("Listing {} not found; skipping missing-file report", listing.display());
    }

    Ok(())
}

fn write_entries<'a>(
    path: &Path,
    session: &Session,
    header: bool,
    entries: impl Iterator<Item = &'a InventoryEntry>,
) -> Result<usize> {
    let mut sink = CsvSink::create(path, session.csv)?;
    if header {
        sink.header(["year", "filename", "directory"])?;
    }
    for entry in entries {
        let year = entry.year.to_string();
        sink.row([year.as_str(), entry.filename.as_str(), entry.directory.as_str()])?;
    }
    Ok(sink.finish()?)
}
