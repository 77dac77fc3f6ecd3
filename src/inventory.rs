// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Inventory of scanned manifest documents on disk

use crate::error::Result;
use crate::matching::SCAN_EXTENSION;
use crate::table::Table;
use crate::types::{filename_year, InventoryEntry};
use globset::{Glob, GlobMatcher};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Settings for an inventory walk
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Only files whose name matches this glob are listed
    pub pattern: String,
    /// Follow symbolic links while walking
    pub follow_symlinks: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            pattern: "*".to_string(),
            follow_symlinks: false,
        }
    }
}

/// Walk `root` in sorted order and list every matching file
///
/// Within each directory, files come before subdirectories and both are
/// ordered by name.
pub fn scan(root: &Path, config: &InventoryConfig) -> Result<Vec<InventoryEntry>> {
    info!("Scanning {}", root.display());
    let matcher: GlobMatcher = Glob::new(&config.pattern)?.compile_matcher();

    let mut entries = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            debug!("Found directory: {}", entry.path().display());
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().into_owned();
        if !matcher.is_match(&filename) {
            debug!("Skipping {}", entry.path().display());
            continue;
        }

        let directory = entry
            .path()
            .parent()
            .unwrap_or(root)
            .display()
            .to_string();

        entries.push(InventoryEntry {
            year: filename_year(&filename)?,
            filename,
            directory,
        });
    }

    info!("Found {} files under {}", entries.len(), root.display());
    Ok(entries)
}

/// Filenames already catalogued in a listing table (column 1 plus `.pdf`)
pub fn listed_filenames(listing: &Table) -> Result<HashSet<String>> {
    Ok(listing
        .column(1)?
        .into_iter()
        .map(|stem| format!("{stem}{SCAN_EXTENSION}"))
        .collect())
}

/// Entries whose filename is absent from `listed`, in walk order
#[must_use]
pub fn unlisted<'a>(entries: &'a [InventoryEntry], listed: &HashSet<String>) -> Vec<&'a InventoryEntry> {
    entries
        .iter()
        .filter(|e| !listed.contains(&e.filename))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CsvOptions;
    use std::fs;
    use tempfile::TempDir;

    fn make_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(dir.path().join("HMM2011-2.pdf"), b"").unwrap();
        fs::write(dir.path().join("HMM2011-1.pdf"), b"").unwrap();
        fs::write(sub.join("HMM2012-7.pdf"), b"").unwrap();
        fs::write(sub.join("notes.txt"), b"").unwrap();
        dir
    }

    #[test]
    fn test_scan_sorted_with_pattern() {
        let dir = make_tree();
        let config = InventoryConfig {
            pattern: "*.pdf".into(),
            ..InventoryConfig::default()
        };

        let entries = scan(dir.path(), &config).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, ["HMM2011-1.pdf", "HMM2011-2.pdf", "HMM2012-7.pdf"]);
        assert_eq!(entries[2].year, 2012);
        assert!(entries[2].directory.ends_with("sub"));
    }

    #[test]
    fn test_scan_lists_files_before_subdirectories() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("A");
        fs::create_dir_all(&sub).unwrap();
        fs::write(dir.path().join("ZZZ2013-1.pdf"), b"").unwrap();
        fs::write(dir.path().join("HMM2011-1.pdf"), b"").unwrap();
        fs::write(sub.join("HMM2012-1.pdf"), b"").unwrap();

        let entries = scan(dir.path(), &InventoryConfig::default()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, ["HMM2011-1.pdf", "ZZZ2013-1.pdf", "HMM2012-1.pdf"]);
        assert!(entries[2].directory.ends_with('A'));
    }

    #[test]
    fn test_scan_fails_on_file_without_year() {
        let dir = make_tree();
        assert!(scan(dir.path(), &InventoryConfig::default()).is_err());
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        assert!(scan(&missing, &InventoryConfig::default()).is_err());
    }

    #[test]
    fn test_bad_pattern_fails() {
        let dir = make_tree();
        let config = InventoryConfig {
            pattern: "[".into(),
            ..InventoryConfig::default()
        };
        assert!(scan(dir.path(), &config).is_err());
    }

    #[test]
    fn test_unlisted() {
        let listing = Table::from_reader(
            Path::new("data.csv"),
            "2011,HMM2011-1\n".as_bytes(),
            CsvOptions::default(),
        )
        .unwrap();
        let listed = listed_filenames(&listing).unwrap();

        let entries = vec![
            InventoryEntry { year: 2011, filename: "HMM2011-1.pdf".into(), directory: "d".into() },
            InventoryEntry { year: 2011, filename: "HMM2011-2.pdf".into(), directory: "d".into() },
        ];
        let missing = unlisted(&entries, &listed);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].filename, "HMM2011-2.pdf");
    }
}
