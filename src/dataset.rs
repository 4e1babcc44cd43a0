//! Read-only columnar table consumed by the chart builders.
//!
//! A [`Dataset`] is a list of equally long named columns, each either numeric
//! or text. Missing cells are `None`; NaN is treated as missing on the way in.

use crate::error::{Result, VizError};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Cell storage for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    /// Numeric column without missing values.
    pub fn numeric<I>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::numeric_opt(name, values.into_iter().map(Some))
    }

    /// Numeric column with optional cells. NaN and infinities become `None`.
    pub fn numeric_opt<I>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let data = values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        Self {
            name: name.to_string(),
            data: ColumnData::Numeric(data),
        }
    }

    /// Text column; empty strings are stored as missing.
    pub fn text<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let data = values
            .into_iter()
            .map(|s| {
                let s = s.as_ref();
                if s.is_empty() { None } else { Some(s.to_string()) }
            })
            .collect();
        Self {
            name: name.to_string(),
            data: ColumnData::Text(data),
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    /// Numeric cells, or `None` for a text column.
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    /// Present numeric values with missing cells dropped.
    pub fn dropna(&self) -> Vec<f64> {
        self.as_numeric()
            .map(|v| v.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Display form of a cell, `None` when missing.
    pub fn display_value(&self, row: usize) -> Option<String> {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).copied().flatten().map(format_number),
            ColumnData::Text(v) => v.get(row).cloned().flatten(),
        }
    }
}

/// Integers print without a trailing `.0`, everything else as-is.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Rows × named columns. Never mutated by the chart builders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build from columns. All columns must have the same length and distinct names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = AHashMap::new();
        for c in &columns {
            if c.len() != rows {
                return Err(VizError::invalid(format!(
                    "column '{}' has {} rows, expected {}",
                    c.name,
                    c.len(),
                    rows
                )));
            }
            if seen.insert(c.name.as_str(), ()).is_some() {
                return Err(VizError::invalid(format!("duplicate column '{}'", c.name)));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Load a CSV file with a header row.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Load CSV from any reader. A column is numeric when every non-missing
    /// cell parses as a float; `""`, `NA`, `NaN` and `null` are missing.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for record in rdr.records() {
            let record = record?;
            for (i, cells) in raw.iter_mut().enumerate() {
                let cell = record.get(i).map(str::trim).unwrap_or("");
                cells.push(if is_missing_token(cell) {
                    None
                } else {
                    Some(cell.to_string())
                });
            }
        }

        let columns = headers
            .iter()
            .zip(raw)
            .map(|(name, cells)| infer_column(name, cells))
            .collect();
        Self::new(columns)
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Dataset::column`], but an unknown name is an `InvalidArgument`.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| VizError::invalid(format!("unknown column '{name}'")))
    }

    /// Names of all numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Numeric cells of a named column, `None` if absent or text.
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        self.column(name).and_then(Column::as_numeric)
    }

    /// Frequency of each distinct non-missing value, most frequent first.
    /// Ties keep first-appearance order.
    pub fn value_counts(&self, name: &str) -> Result<Vec<(String, usize)>> {
        let col = self.require_column(name)?;
        let mut index: AHashMap<String, usize> = AHashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in 0..col.len() {
            if let Some(v) = col.display_value(row) {
                match index.get(&v) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        index.insert(v.clone(), counts.len());
                        counts.push((v, 1));
                    }
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts)
    }
}

fn is_missing_token(cell: &str) -> bool {
    cell.is_empty()
        || cell.eq_ignore_ascii_case("na")
        || cell.eq_ignore_ascii_case("nan")
        || cell.eq_ignore_ascii_case("null")
}

fn infer_column(name: &str, cells: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|c| match c {
            None => Some(None),
            Some(s) => s.parse::<f64>().ok().map(Some),
        })
        .collect();
    match parsed {
        Some(values) if cells.iter().any(Option::is_some) => Column::numeric_opt(name, values),
        _ => Column {
            name: name.to_string(),
            data: ColumnData::Text(cells),
        },
    }
}
