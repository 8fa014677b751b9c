use crate::error::{AttrError, Result as AttrResult};
use crate::scalar::{fits_exactly, GroupKey, Scalar};
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// The narrow capability contract the attribute engine needs from a dataset.
///
/// Implementors provide column membership and per-row projection; duplicate
/// removal and stable sorting have default implementations over projected rows.
pub trait Dataset: fmt::Debug {
    /// Column names in schema order
    fn column_names(&self) -> Vec<String>;

    fn has_column(&self, name: &str) -> bool {
        self.column_names().iter().any(|c| c == name)
    }

    /// Extract the values of `columns` for every row, in row order.
    /// Fails with `InvalidColumns` if any column is missing.
    fn project(&self, columns: &[String]) -> AttrResult<Vec<GroupKey>>;

    /// Remove duplicate rows, keeping the first occurrence of each
    fn distinct(&self, rows: Vec<GroupKey>) -> Vec<GroupKey> {
        let mut seen = HashSet::with_capacity(rows.len());
        rows.into_iter().filter(|row| seen.insert(row.clone())).collect()
    }

    /// Stable sort of projected rows by their column values
    fn sort_rows(&self, rows: &mut [GroupKey], ascending: bool) {
        if ascending {
            rows.sort();
        } else {
            rows.sort_by(|a, b| b.cmp(a));
        }
    }
}

/// In-memory table of typed cells
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Scalar>>) -> Self {
        Self { headers, rows }
    }

    /// Create a Table from raw CSV content, inferring cell types
    pub fn from_csv(csv: crate::csv_reader::CsvData) -> Self {
        let rows = csv
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| Scalar::infer(cell)).collect())
            .collect();
        Self {
            headers: csv.headers,
            rows,
        }
    }

    /// Create a Table from a JSON Array of Objects
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

        if array.is_empty() {
            return Err(anyhow!("Input data array is empty"));
        }

        // Extract headers from the first object
        let first_obj = array[0]
            .as_object()
            .ok_or_else(|| anyhow!("Items in array must be objects"))?;

        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Items in array must be objects"))?;

            let mut row = Vec::with_capacity(headers.len());
            for header in &headers {
                let cell = match obj.get(header) {
                    Some(Value::String(s)) => Scalar::Text(s.clone()),
                    Some(Value::Number(n)) => {
                        let value = n
                            .as_f64()
                            .ok_or_else(|| anyhow!("Number out of range for field '{}'", header))?;
                        if n.is_f64() || fits_exactly(value) {
                            Scalar::number(value)
                        } else {
                            Scalar::Text(n.to_string())
                        }
                    }
                    Some(Value::Bool(b)) => Scalar::Bool(*b),
                    Some(Value::Null) | None => Scalar::Null,
                    _ => return Err(anyhow!("Unsupported value type for field '{}'", header)),
                };
                row.push(cell);
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

impl Dataset for Table {
    fn column_names(&self) -> Vec<String> {
        self.headers.clone()
    }

    fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn project(&self, columns: &[String]) -> AttrResult<Vec<GroupKey>> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|c| !self.has_column(c))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(AttrError::InvalidColumns {
                columns: missing,
                available: self.headers.clone(),
            });
        }

        let indices: Vec<usize> = columns.iter().filter_map(|c| self.column_index(c)).collect();

        Ok(self
            .rows
            .iter()
            .map(|row| {
                GroupKey::new(
                    indices
                        .iter()
                        .map(|&i| row.get(i).cloned().unwrap_or(Scalar::Null))
                        .collect(),
                )
            })
            .collect())
    }
}
