// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Shipgraph CLI - shipment manifest tables in, networks and matches out

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use shipgraph::commands::{self, Session, Ui};
use shipgraph::config;

#[derive(Parser)]
#[command(name = "shipgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "SHIPGRAPH_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Treat the first row of every input as a header
    #[arg(long, global = true)]
    headers: bool,

    /// Field delimiter for inputs and outputs
    #[arg(long, global = true)]
    delimiter: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the company trade network (nodes, links, export/import tallies)
    Network(commands::network::NetworkArgs),

    /// Extract exporter/importer columns
    Pairs(commands::pairs::PairsArgs),

    /// Select shipments whose waste description contains a term
    Lookup(commands::lookup::LookupArgs),

    /// Find rows sharing a manifest number but naming different files
    ManifestCheck(commands::manifest_check::ManifestCheckArgs),

    /// Attach EPA ID numbers to scanned manifest filenames
    Manifests(commands::manifests::ManifestsArgs),

    /// Inventory scanned manifests and flag uncatalogued files
    FileCheck(commands::file_check::FileCheckArgs),

    /// Show configuration
    Config {
        /// Action: show (default), path
        action: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(delimiter) = cli.delimiter {
        config.csv.delimiter = delimiter;
    }
    if cli.headers {
        config.csv.headers = true;
    }

    let session = Session {
        csv: config.csv.options()?,
        config,
        ui: Ui::new(!cli.no_color, cli.quiet),
    };

    // Execute command
    match cli.command {
        Commands::Network(args) => commands::network::run(&session, args),
        Commands::Pairs(args) => commands::pairs::run(&session, args),
        Commands::Lookup(args) => commands::lookup::run(&session, args),
        Commands::ManifestCheck(args) => commands::manifest_check::run(&session, args),
        Commands::Manifests(args) => commands::manifests::run(&session, args),
        Commands::FileCheck(args) => commands::file_check::run(&session, args),
        Commands::Config { action } => {
            commands::config::run(&session, action.as_deref(), cli.config.as_deref())
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
