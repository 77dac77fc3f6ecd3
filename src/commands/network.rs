// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Network command - builds the company trade network document

use super::Session;
use crate::network::NetworkBuilder;
use crate::table::{write_text, Table};
use crate::types::{EdgeMode, NetworkFormat};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `shipgraph network`
#[derive(Debug, Clone, Default, Args)]
pub struct NetworkArgs {
    /// Shipment table (one row per shipment)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (json, dot)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Edge folding (contiguous, grouped)
    #[arg(long)]
    pub edges: Option<String>,

    /// Exporter column (0-based)
    #[arg(long)]
    pub source_column: Option<usize>,

    /// Importer column (0-based)
    #[arg(long)]
    pub target_column: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Run the network command
pub fn run(session: &Session, args: NetworkArgs) -> Result<()> {
    let defaults = &session.config.network;
    let input = args.input.unwrap_or_else(|| defaults.input.clone());
    let output = args.output.unwrap_or_else(|| defaults.output.clone());

    let format_name = args.format.as_deref().unwrap_or(&defaults.format);
    let format = NetworkFormat::from_str(format_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown network format: {}. Supported: json, dot", format_name))?;

    let edges_name = args.edges.as_deref().unwrap_or(&defaults.edges);
    let edge_mode = EdgeMode::from_str(edges_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown edge mode: {}. Supported: contiguous, grouped", edges_name))?;

    let source_column = args.source_column.unwrap_or(defaults.source_column);
    let target_column = args.target_column.unwrap_or(defaults.target_column);

    info!("Building {} network from {}", format.extension(), input.display());

    let table = Table::read(&input, session.csv)
        .with_context(|| format!("Failed to load shipments from {}", input.display()))?;

    let network = NetworkBuilder::new()
        .columns(source_column, target_column)
        .edge_mode(edge_mode)
        .build(&table)?;

    if network.is_empty() {
        session.ui.warn(&format!("{} has no shipment rows", input.display()));
    }

    let content = match format {
        NetworkFormat::Json => network.to_json(args.pretty || defaults.pretty)?,
        NetworkFormat::Dot => network.to_dot(),
    };

    write_text(&output, &content)
        .with_context(|| format!("Failed to write network to {}", output.display()))?;

    session.ui.wrote(&output, network.link_count(), "links");
    session.ui.detail("nodes", network.node_count());
    session.ui.detail("shipments", network.rows);
    session.ui.detail("clusters", network.component_count());

    Ok(())
}
