// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Cross-referencing manifest numbers and scanned filenames
//!
//! Both joins are nested scans that keep file order: the outer table drives
//! output order and the inner table is searched front to back.

use crate::error::Result;
use crate::table::Table;
use crate::types::{filename_year, FileMatch, ManifestMatch};
use tracing::debug;

/// Extension appended to ids-table names before comparing with filenames
pub const SCAN_EXTENSION: &str = ".pdf";

/// Every ordered pair of rows that share a manifest number but name
/// different files
///
/// Both orientations of a pair are reported, outer row first.
pub fn manifest_matches(
    table: &Table,
    manifest_column: usize,
    filename_column: usize,
) -> Result<Vec<ManifestMatch<'_>>> {
    let keys: Vec<(&str, &str)> = (0..table.len())
        .map(|row| {
            Ok((
                table.field(row, manifest_column)?,
                table.field(row, filename_column)?,
            ))
        })
        .collect::<Result<_>>()?;

    let mut matches = Vec::new();
    for &(manifest, filename) in &keys {
        for &(other_manifest, other_filename) in &keys {
            if manifest == other_manifest && filename != other_filename {
                matches.push(ManifestMatch {
                    manifest,
                    filename,
                    other_manifest,
                    other_filename,
                });
            }
        }
    }

    debug!(
        "{} manifest matches across {} rows of {}",
        matches.len(),
        keys.len(),
        table.path().display()
    );
    Ok(matches)
}

/// Pair each scanned filename with the EPA ID of the first ids row naming it
///
/// `files` holds the filename in column 0; `ids` holds the EPA number in
/// column 0 and the extensionless filename in column 1. Filenames with no
/// matching ids row are skipped.
pub fn match_filenames<'a>(files: &'a Table, ids: &'a Table) -> Result<Vec<FileMatch<'a>>> {
    let mut matches = Vec::new();
    for row in 0..files.len() {
        let filename = files.field(row, 0)?;
        for id_row in 0..ids.len() {
            let stem = ids.field(id_row, 1)?;
            if is_scan_of(filename, stem) {
                matches.push(FileMatch {
                    epa_number: ids.field(id_row, 0)?,
                    year: filename_year(filename)?,
                    filename,
                });
                break;
            }
        }
    }

    debug!(
        "Matched {} of {} filenames against {}",
        matches.len(),
        files.len(),
        ids.path().display()
    );
    Ok(matches)
}

/// Whether `filename` is `stem` plus the scan extension
fn is_scan_of(filename: &str, stem: &str) -> bool {
    filename
        .strip_suffix(SCAN_EXTENSION)
        .is_some_and(|base| base == stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CsvOptions;
    use std::path::Path;

    fn load(name: &str, data: &str) -> Table {
        Table::from_reader(Path::new(name), data.as_bytes(), CsvOptions::default()).unwrap()
    }

    #[test]
    fn test_manifest_matches_both_orientations() {
        let table = load("gephi.csv", "x,M1,a.pdf\nx,M2,b.pdf\nx,M1,c.pdf\nx,M1,a.pdf\n");
        let matches = manifest_matches(&table, 1, 2).unwrap();

        let pairs: Vec<_> = matches.iter().map(|m| (m.filename, m.other_filename)).collect();
        assert_eq!(
            pairs,
            vec![("a.pdf", "c.pdf"), ("c.pdf", "a.pdf"), ("c.pdf", "a.pdf"), ("a.pdf", "c.pdf")]
        );
        assert!(matches.iter().all(|m| m.manifest == "M1" && m.other_manifest == "M1"));
    }

    #[test]
    fn test_manifest_without_duplicates_has_no_matches() {
        let table = load("gephi.csv", "M1,a\nM2,b\n");
        assert!(manifest_matches(&table, 0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_manifest_short_row_fails() {
        let table = load("gephi.csv", "M1,a\nM2\n");
        assert!(manifest_matches(&table, 0, 1).is_err());
    }

    #[test]
    fn test_match_filenames_first_match_wins() {
        let files = load("files.csv", "HMM2011-1.pdf\nHMM2012-9.pdf\nHMM2013-5.pdf\n");
        let ids = load(
            "ids.csv",
            "CAD001,HMM2013-5\nCAD002,HMM2011-1\nCAD003,HMM2011-1\n",
        );

        let matches = match_filenames(&files, &ids).unwrap();
        assert_eq!(
            matches,
            vec![
                FileMatch { epa_number: "CAD002", year: 2011, filename: "HMM2011-1.pdf" },
                FileMatch { epa_number: "CAD001", year: 2013, filename: "HMM2013-5.pdf" },
            ]
        );
    }

    #[test]
    fn test_match_filenames_requires_pdf_extension() {
        let files = load("files.csv", "HMM2011-1\n");
        let ids = load("ids.csv", "CAD001,HMM2011-1\n");
        assert!(match_filenames(&files, &ids).unwrap().is_empty());
    }

    #[test]
    fn test_matched_filename_without_year_fails() {
        let files = load("files.csv", "ab.pdf\n");
        let ids = load("ids.csv", "CAD001,ab\n");
        assert!(match_filenames(&files, &ids).is_err());
    }
}
