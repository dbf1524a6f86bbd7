use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

/// One of the two designated sides of a bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Red,
    Blue,
}

impl Corner {
    pub const BOTH: [Corner; 2] = [Corner::Red, Corner::Blue];

    pub fn label(self) -> &'static str {
        match self {
            Corner::Red => "Red",
            Corner::Blue => "Blue",
        }
    }

    /// Prefix of the paired per-corner stat columns ("RedWins" / "BlueWins").
    pub fn stat_prefix(self) -> &'static str {
        self.label()
    }

    /// Prefix of the paired per-corner ranking columns ("RPFPRank" / "BPFPRank").
    pub fn rank_prefix(self) -> &'static str {
        match self {
            Corner::Red => "R",
            Corner::Blue => "B",
        }
    }
}

/// The source file fully materialized: a header index plus record-oriented
/// rows. Cells holding the empty string are treated as missing everywhere.
pub struct SourceTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open source csv {}", path.display()))?;
        Self::from_csv_reader(file)
            .with_context(|| format!("read source csv {}", path.display()))
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new().from_reader(reader);
        let headers = csv
            .headers()
            .context("read source header row")?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (pos, record) in csv.records().enumerate() {
            let record = record.with_context(|| format!("read source row {}", pos + 1))?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }
        Ok(Self::new(headers, rows))
    }

    /// Builds a table directly from in-memory cells. Tests use this to avoid
    /// spelling out the full hundred-column header for every scenario.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Self { headers, index, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = SourceRecord<'_>> {
        (0..self.rows.len()).map(move |row| SourceRecord { table: self, row })
    }

    /// Fatal schema check: every referenced column must exist before any
    /// transform or load runs.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        let missing = columns
            .iter()
            .filter(|name| !self.index.contains_key(**name))
            .copied()
            .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(anyhow!(
                "source file is missing {} expected column(s): {}",
                missing.len(),
                missing.join(", ")
            ))
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Read-only view over one source row.
#[derive(Clone, Copy)]
pub struct SourceRecord<'a> {
    table: &'a SourceTable,
    row: usize,
}

impl<'a> SourceRecord<'a> {
    /// Zero-based position of this record in the source file.
    pub fn position(&self) -> usize {
        self.row
    }

    /// Cell content by column name; absent columns and empty cells are both
    /// missing values.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.table.index.get(column)?;
        let cell = self.table.rows[self.row].get(idx)?.as_str();
        if cell.is_empty() { None } else { Some(cell) }
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        crate::normalize::coerce_numeric(self.get(column))
    }

    pub fn integer(&self, column: &str) -> Option<i64> {
        self.number(column).map(|v| v.round() as i64)
    }

    pub fn boolean(&self, column: &str) -> Option<bool> {
        match self.get(column)?.trim() {
            v if v.eq_ignore_ascii_case("true") => Some(true),
            v if v.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}
