// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Shipgraph library - shipment manifest tables in, networks and matches out
//!
//! This crate provides the transformations behind the `shipgraph` CLI:
//! building a company trade network from shipment rows, extracting and
//! filtering columns, and cross-referencing manifest numbers and filenames.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod inventory;
pub mod matching;
pub mod network;
pub mod table;

pub use error::{Result, ShipError};

/// Core data types shared by the transformations
pub mod types {
    use crate::error::{Result, ShipError};
    use serde::ser::SerializeMap;
    use serde::{Serialize, Serializer};

    // =========================================================================
    // Network
    // =========================================================================

    /// A company in the trade network
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct Node {
        /// Company name, unique within a network
        pub name: String,
        /// Position in the node list, assigned on first encounter
        pub index: usize,
    }

    /// Aggregated shipments from one company to another
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct Link {
        /// Index of the exporting node
        pub source: usize,
        /// Index of the importing node
        pub target: usize,
        /// Number of shipment rows folded into this link
        pub value: u64,
    }

    /// Per-company shipment tally
    ///
    /// Serializes as a single-key object, `{"<name>": count}`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct NodeCount {
        /// Company name
        pub name: String,
        /// Number of rows
        pub count: u64,
    }

    impl Serialize for NodeCount {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(&self.name, &self.count)?;
            map.end()
        }
    }

    /// How repeated (source, target) rows are folded into links
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum EdgeMode {
        /// Only immediately adjacent repeats merge; each run is one link
        #[default]
        Contiguous,
        /// One link per distinct pair, in first-occurrence order
        Grouped,
    }

    impl EdgeMode {
        /// Parse an edge mode from string
        pub fn from_str(s: &str) -> Option<Self> {
            match s.to_lowercase().as_str() {
                "contiguous" | "runs" => Some(Self::Contiguous),
                "grouped" | "group-by" => Some(Self::Grouped),
                _ => None,
            }
        }
    }

    /// Network output format
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum NetworkFormat {
        /// Node/link JSON document
        Json,
        /// Graphviz DOT
        Dot,
    }

    impl NetworkFormat {
        /// Parse format from string
        pub fn from_str(s: &str) -> Option<Self> {
            match s.to_lowercase().as_str() {
                "json" => Some(Self::Json),
                "dot" | "graphviz" => Some(Self::Dot),
                _ => None,
            }
        }

        /// Get file extension for format
        #[must_use]
        pub fn extension(&self) -> &'static str {
            match self {
                Self::Json => "json",
                Self::Dot => "dot",
            }
        }
    }

    // =========================================================================
    // Matching
    // =========================================================================

    /// Two rows sharing a manifest number but naming different files
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ManifestMatch<'a> {
        /// Manifest number of the outer row
        pub manifest: &'a str,
        /// Filename of the outer row
        pub filename: &'a str,
        /// Manifest number of the inner row
        pub other_manifest: &'a str,
        /// Filename of the inner row
        pub other_filename: &'a str,
    }

    /// A scanned filename paired with its EPA identification number
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileMatch<'a> {
        /// EPA ID number from the ids table
        pub epa_number: &'a str,
        /// Year encoded in the filename
        pub year: u32,
        /// Filename from the files table
        pub filename: &'a str,
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// A file found under the scanned-documents root
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct InventoryEntry {
        /// Year encoded in the filename
        pub year: u32,
        /// Bare file name
        pub filename: String,
        /// Directory holding the file
        pub directory: String,
    }

    /// Extract the four-digit year stored at characters 3..7 of a filename
    ///
    /// Scanned manifests are named like `HMM2011-0042.pdf`.
    pub fn filename_year(filename: &str) -> Result<u32> {
        let digits: String = filename.chars().skip(3).take(4).collect();
        Some(digits)
            .filter(|d| d.chars().count() == 4)
            .and_then(|d| d.trim().parse().ok())
            .ok_or_else(|| ShipError::InvalidYear {
                filename: filename.to_string(),
            })
    }

}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{Result, ShipError};
    pub use crate::table::{CsvOptions, CsvSink, Table};
    pub use crate::types::*;
}
