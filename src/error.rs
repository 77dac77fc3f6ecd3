// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error type shared by every transformation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, transforming or writing shipment tables
#[derive(Error, Debug)]
pub enum ShipError {
    /// A file could not be opened, created, read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer rejected the data
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },

    /// A row is narrower than a column the transformation indexes
    #[error(
        "{}: line {line} has {width} column(s), column {column} is required",
        .path.display()
    )]
    MissingColumn {
        /// File the row came from
        path: PathBuf,
        /// 1-based line number of the record
        line: u64,
        /// 0-based column that was requested
        column: usize,
        /// Number of fields the row actually has
        width: usize,
    },

    /// A filename carries no numeric year at characters 3..7
    #[error("no year at characters 3..7 of filename {filename:?}")]
    InvalidYear {
        /// Offending filename
        filename: String,
    },

    /// A lookup term that cannot be used as a search key or file stem
    #[error("invalid lookup term: {0}")]
    InvalidTerm(String),

    /// The configured CSV delimiter is not a single ASCII character
    #[error("invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(String),

    /// Directory traversal failed
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file name pattern did not compile
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl ShipError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a CSV error with the path it concerns
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Result alias over [`ShipError`]
pub type Result<T> = std::result::Result<T, ShipError>;
