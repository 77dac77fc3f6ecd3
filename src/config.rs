// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Defaults are compiled in; a TOML file and `SHIPGRAPH_*` environment
//! variables are layered on top, and CLI flags win over all of them.

use crate::error::{Result, ShipError};
use crate::table::CsvOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "SHIPGRAPH";

/// Config file name looked up in the platform config directory
pub const CONFIG_FILE: &str = "shipgraph.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV dialect for every input and output
    pub csv: CsvConfig,
    /// Trade network builder
    pub network: NetworkConfig,
    /// Exporter/importer extraction
    pub pairs: PairsConfig,
    /// Waste-type lookup
    pub lookup: LookupConfig,
    /// Manifest self-join
    pub manifest_check: ManifestCheckConfig,
    /// Filename to EPA ID join
    pub manifests: ManifestsConfig,
    /// Scanned document inventory
    pub file_check: FileCheckConfig,
}

/// CSV dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter, a single ASCII character
    pub delimiter: String,
    /// Skip the first row of every input
    pub headers: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            headers: false,
        }
    }
}

impl CsvConfig {
    /// Reader/writer options for this dialect
    pub fn options(&self) -> Result<CsvOptions> {
        Ok(CsvOptions {
            delimiter: parse_delimiter(&self.delimiter)?,
            has_headers: self.headers,
        })
    }
}

/// Check that a delimiter is exactly one ASCII character
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ShipError::InvalidDelimiter(s.to_string())),
    }
}

/// Trade network defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Shipment table
    pub input: PathBuf,
    /// Network document
    pub output: PathBuf,
    /// Exporter column
    pub source_column: usize,
    /// Importer column
    pub target_column: usize,
    /// Edge folding: contiguous or grouped
    pub edges: String,
    /// Output format: json or dot
    pub format: String,
    /// Pretty-print JSON
    pub pretty: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("inputs/2011-2012 shipment network analysis by company.csv"),
            output: PathBuf::from("outputs/trades11-12.json"),
            source_column: 0,
            target_column: 1,
            edges: "contiguous".to_string(),
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Exporter/importer extraction defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairsConfig {
    /// Full shipment export
    pub input: PathBuf,
    /// Two-column result
    pub output: PathBuf,
    /// Exporter column
    pub exporter_column: usize,
    /// Importer column
    pub importer_column: usize,
}

impl Default for PairsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("gephi.csv"),
            output: PathBuf::from("gephiResults.csv"),
            exporter_column: 4,
            importer_column: 26,
        }
    }
}

/// Waste-type lookup defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Full shipment export
    pub input: PathBuf,
    /// Directory receiving `<term>.csv`
    pub output_dir: PathBuf,
    /// Waste description column
    pub column: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("inputs/gephi.csv"),
            output_dir: PathBuf::from("outputs"),
            column: 12,
        }
    }
}

/// Manifest self-join defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestCheckConfig {
    /// Full shipment export
    pub input: PathBuf,
    /// Match report
    pub output: PathBuf,
    /// Manifest number column
    pub manifest_column: usize,
    /// Scanned filename column
    pub filename_column: usize,
}

impl Default for ManifestCheckConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("inputs/gephi.csv"),
            output: PathBuf::from("outputs/manifestCheck.csv"),
            manifest_column: 3,
            filename_column: 41,
        }
    }
}

/// Filename to EPA ID join defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestsConfig {
    /// Scanned file inventory (filename in column 0)
    pub files: PathBuf,
    /// EPA ID table (ID in column 0, filename stem in column 1)
    pub ids: PathBuf,
    /// Joined result
    pub output: PathBuf,
}

impl Default for ManifestsConfig {
    fn default() -> Self {
        Self {
            files: PathBuf::from("allImportsforHMM.csv"),
            ids: PathBuf::from("allforMans.csv"),
            output: PathBuf::from("manifestsHMM.csv"),
        }
    }
}

/// Scanned document inventory defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCheckConfig {
    /// Directory tree of scanned documents
    pub root: PathBuf,
    /// Existing catalogue (filename stem in column 1)
    pub listing: PathBuf,
    /// Full inventory
    pub output: PathBuf,
    /// Files absent from the catalogue
    pub missing: PathBuf,
    /// File name glob
    pub pattern: String,
}

impl Default for FileCheckConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data/EPA follow up data OCR"),
            listing: PathBuf::from("inputs/data.csv"),
            output: PathBuf::from("outputs/allImportsforHMM.csv"),
            missing: PathBuf::from("inputs/FilesTBD.csv"),
            pattern: "*".to_string(),
        }
    }
}

/// Default config file location in the platform config directory
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "hyperpolymath", "shipgraph")
        .map(|d| d.config_dir().join(CONFIG_FILE))
}

/// Load configuration: defaults, then the file, then the environment
///
/// An explicit `path` must exist; the default location is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let (file, required) = match path {
        Some(p) => (Some(p.to_path_buf()), true),
        None => (default_path(), false),
    };

    let mut builder = ::config::Config::builder();
    if let Some(ref file) = file {
        debug!("Reading configuration from {}", file.display());
        builder = builder.add_source(
            ::config::File::from(file.as_path())
                .format(::config::FileFormat::Toml)
                .required(required),
        );
    }
    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?.try_deserialize()?;
    Ok(config)
}

/// Render configuration as TOML
pub fn to_toml(config: &Config) -> std::result::Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pairs.exporter_column, 4);
        assert_eq!(config.pairs.importer_column, 26);
        assert_eq!(config.lookup.column, 12);
        assert_eq!(config.manifest_check.filename_column, 41);
        assert_eq!(config.network.output, PathBuf::from("outputs/trades11-12.json"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shipgraph.toml");
        fs::write(
            &path,
            "[csv]\ndelimiter = \";\"\n\n[network]\nedges = \"grouped\"\nsource_column = 2\n",
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.csv.delimiter, ";");
        assert_eq!(config.network.edges, "grouped");
        assert_eq!(config.network.source_column, 2);
        assert_eq!(config.network.target_column, 1);
        assert_eq!(config.pairs, PairsConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let rendered = to_toml(&config).unwrap();
        assert!(rendered.contains("[network]"));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
