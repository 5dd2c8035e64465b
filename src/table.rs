use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::lexer;

/// A loosely-typed cell, as lexed from the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Number(f64),
    /// Empty cell or placeholder token (`***`, `---`).
    Missing,
}

impl Field {
    /// Reads the cell as a year. Integral floats such as `1880.0` are accepted.
    pub fn as_year(&self) -> Option<i32> {
        let n = match self {
            Field::Number(n) => *n,
            Field::Text(text) => {
                let text = text.trim();
                if let Ok(year) = text.parse() {
                    return Some(year);
                }
                text.parse().ok()?
            }
            Field::Missing => return None,
        };
        if n.fract() == 0.0 && n >= i32::MIN as f64 && n <= i32::MAX as f64 {
            Some(n as i32)
        } else {
            None
        }
    }

    /// Reads the cell as a value; anything that isn't a finite number is
    /// the missing marker.
    pub fn as_value(&self) -> Option<f64> {
        let n = match self {
            Field::Number(n) => *n,
            Field::Text(text) => text.trim().parse().ok()?,
            Field::Missing => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Reads the cell as a display name. Blank text is no name.
    pub fn as_name(&self) -> Option<String> {
        match self {
            Field::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Field::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Number(value)
    }
}

/// One data line, keyed by column name. A column absent from the row means
/// the line was too short to reach it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, Field>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Field> {
        self.fields.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, field: impl Into<Field>) {
        self.fields.insert(column.into(), field.into());
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Field>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Whitespace,
    Comma,
}

/// How the text of a source is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableFormat {
    /// Lines dropped before looking for the header.
    #[serde(default)]
    pub skip_rows: usize,
    #[serde(default)]
    pub delimiter: Delimiter,
}

impl TableFormat {
    pub fn whitespace(skip_rows: usize) -> Self {
        Self {
            skip_rows,
            delimiter: Delimiter::Whitespace,
        }
    }

    pub fn csv(skip_rows: usize) -> Self {
        Self {
            skip_rows,
            delimiter: Delimiter::Comma,
        }
    }
}

/// A fetched dataset: its column header (the row shape) and its rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    /// Builds a table whose shape is every column seen in `rows`.
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for column in row.columns() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.to_string());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Parses delimited text. `location` only names the source in errors.
    pub fn parse(text: &str, format: &TableFormat, location: &str) -> Result<Self, FetchError> {
        let mut lines = text
            .lines()
            .skip(format.skip_rows)
            .filter(|line| !line.trim().is_empty());

        let header = lines.next().ok_or_else(|| FetchError::MissingHeader {
            location: location.to_string(),
        })?;
        let columns: Vec<String> = match format.delimiter {
            Delimiter::Whitespace => lexer::spaced_cells(header)
                .into_iter()
                .map(String::from)
                .collect(),
            Delimiter::Comma => lexer::csv_cells(header),
        };

        let mut rows = Vec::new();
        for line in lines {
            let fields = match format.delimiter {
                Delimiter::Whitespace => lexer::spaced_fields(line),
                Delimiter::Comma => lexer::csv_fields(line),
            };
            if fields.len() > columns.len() {
                tracing::trace!(
                    "ignoring {} extra cells in {location}",
                    fields.len() - columns.len()
                );
            }
            rows.push(columns.iter().cloned().zip(fields).collect());
        }

        tracing::debug!(
            "parsed {} rows over {} columns from {location}",
            rows.len(),
            columns.len()
        );
        Ok(Self { columns, rows })
    }
}
