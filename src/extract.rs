// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Column extraction and substring lookup over a single table

use crate::error::{Result, ShipError};
use crate::table::Table;
use csv::StringRecord;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prompt shown when the lookup term is read interactively
pub const LOOKUP_PROMPT: &str = "What waste do you want to know about?(Hint: USE CAPS!) ";

/// Pull the exporter and importer fields out of every row, in file order
pub fn exporter_importer_pairs(
    table: &Table,
    exporter_column: usize,
    importer_column: usize,
) -> Result<Vec<(&str, &str)>> {
    (0..table.len())
        .map(|row| {
            Ok((
                table.field(row, exporter_column)?,
                table.field(row, importer_column)?,
            ))
        })
        .collect()
}

/// Rows whose `column` contains `term` (case-sensitive), in file order
pub fn rows_containing<'t>(
    table: &'t Table,
    column: usize,
    term: &str,
) -> Result<Vec<&'t StringRecord>> {
    let mut matches = Vec::new();
    for row in 0..table.len() {
        if table.field(row, column)?.contains(term) {
            matches.push(&table.rows()[row]);
        }
    }
    debug!("{} of {} rows contain {:?}", matches.len(), table.len(), term);
    Ok(matches)
}

/// Check that a lookup term is usable as a search key and a file stem
pub fn validate_term(term: &str) -> Result<&str> {
    if term.is_empty() {
        return Err(ShipError::InvalidTerm("term is empty".into()));
    }
    if term.contains(['/', '\\', '\0']) || term == "." || term == ".." {
        return Err(ShipError::InvalidTerm(format!(
            "{term:?} cannot be used as a file name"
        )));
    }
    Ok(term)
}

/// Output file for a lookup term: `<dir>/<term>.csv`
#[must_use]
pub fn lookup_output_path(dir: &Path, term: &str) -> PathBuf {
    dir.join(format!("{term}.csv"))
}

/// Ask for a lookup term on `output` and read one line from `input`
pub fn prompt_term<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    let stdin = Path::new("<stdin>");
    output
        .write_all(LOOKUP_PROMPT.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|e| ShipError::io("<stdout>", e))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| ShipError::io(stdin, e))?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CsvOptions;

    fn load(data: &str) -> Table {
        Table::from_reader(Path::new("gephi.csv"), data.as_bytes(), CsvOptions::default()).unwrap()
    }

    #[test]
    fn test_exporter_importer_pairs() {
        let table = load("a,EXP1,c,IMP1\nd,EXP2,f,IMP2\n");
        let pairs = exporter_importer_pairs(&table, 1, 3).unwrap();
        assert_eq!(pairs, vec![("EXP1", "IMP1"), ("EXP2", "IMP2")]);
    }

    #[test]
    fn test_pairs_fail_on_short_row() {
        let table = load("a,EXP1,c,IMP1\nd,EXP2\n");
        assert!(exporter_importer_pairs(&table, 1, 3).is_err());
    }

    #[test]
    fn test_rows_containing_is_case_sensitive_substring() {
        let table = load("A,SPENT ACID\nB,spent acid\nC,ACID WASTE\n");
        let rows = rows_containing(&table, 1, "ACID").unwrap();
        let names: Vec<_> = rows.iter().map(|r| &r[0]).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_validate_term() {
        assert!(validate_term("LEAD").is_ok());
        assert!(validate_term("").is_err());
        assert!(validate_term("../etc").is_err());
        assert!(validate_term("..").is_err());
    }

    #[test]
    fn test_prompt_term_strips_newline() {
        let mut shown = Vec::new();
        let term = prompt_term("MERCURY\r\n".as_bytes(), &mut shown).unwrap();
        assert_eq!(term, "MERCURY");
        assert_eq!(String::from_utf8(shown).unwrap(), LOOKUP_PROMPT);
    }

    #[test]
    fn test_lookup_output_path() {
        let path = lookup_output_path(Path::new("outputs"), "LEAD");
        assert_eq!(path, Path::new("outputs").join("LEAD.csv"));
    }
}
