// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! CSV loading and writing
//!
//! Every transformation reads whole tables into memory and indexes rows by
//! column position. Rows may be ragged; a short row only fails when a
//! transformation actually asks for a column it lacks.

use crate::error::{Result, ShipError};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reader/writer settings shared by all tables in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Treat the first row of every input as a header and skip it
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
        }
    }
}

/// An in-memory CSV table
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Load a table from disk
    pub fn read(path: &Path, options: CsvOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| ShipError::io(path, e))?;
        Self::from_reader(path, file, options)
    }

    /// Load a table from any reader; `path` is only used in error messages
    pub fn from_reader<R: Read>(path: &Path, reader: R, options: CsvOptions) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_headers)
            .flexible(true)
            .from_reader(reader);

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ShipError::csv(path, e))?;

        debug!("Loaded {} rows from {}", rows.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            rows,
        })
    }

    /// Path the table was loaded from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All data rows in file order
    #[must_use]
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fetch one field of one row, failing on short rows
    pub fn field(&self, row: usize, column: usize) -> Result<&str> {
        let record = &self.rows[row];
        record.get(column).ok_or_else(|| ShipError::MissingColumn {
            path: self.path.clone(),
            line: line_of(record, row),
            column,
            width: record.len(),
        })
    }

    /// Fetch the same column from every row
    pub fn column(&self, column: usize) -> Result<Vec<&str>> {
        (0..self.rows.len()).map(|row| self.field(row, column)).collect()
    }
}

/// Line number reported for a record: the reader's position when known
fn line_of(record: &StringRecord, row: usize) -> u64 {
    record
        .position()
        .map_or(row as u64 + 1, csv::Position::line)
}

/// A CSV output file
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl CsvSink {
    /// Create (or truncate) an output file, creating parent directories
    pub fn create(path: &Path, options: CsvOptions) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ShipError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| ShipError::io(path, e))?;
        let writer = WriterBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .from_writer(file);

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows: 0,
        })
    }

    /// Write the header row; not counted as data
    pub fn header<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(fields)
            .map_err(|e| ShipError::csv(&self.path, e))
    }

    /// Write one data row
    pub fn row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(fields)
            .map_err(|e| ShipError::csv(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and close the file, returning the number of data rows written
    pub fn finish(mut self) -> Result<usize> {
        self.writer
            .flush()
            .map_err(|e| ShipError::io(&self.path, e))?;
        debug!("Wrote {} rows to {}", self.rows, self.path.display());
        Ok(self.rows)
    }

    /// Destination path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write a text document (JSON, DOT) to a file, creating parent directories
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ShipError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ShipError::io(path, e))
}
