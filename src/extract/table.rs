use std::fmt;
use std::io::Write;

use indexmap::IndexMap;
use serde::Serialize;

/// Separator used when a list cell is flattened into a single CSV field
pub const LIST_SEPARATOR: &str = ";";

static NULL: Value = Value::Null;

/// A single cell of an extraction [`Table`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// No value (simple field did not match, or matched without text)
    Null,
    /// Scalar text
    Text(String),
    /// Ordered values of a nested field; `None` marks a match without text
    List(Vec<Option<String>>),
}

impl Value {
    /// Scalar text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// `Text` for `Some`, `Null` for `None`
    pub fn from_option(s: Option<&str>) -> Self {
        s.map_or(Value::Null, Value::text)
    }

    /// List value from borrowed optional strings
    pub fn list<'a, I: IntoIterator<Item = Option<&'a str>>>(items: I) -> Self {
        Value::List(items.into_iter().map(|s| s.map(str::to_string)).collect())
    }

    /// True for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Scalar text, if this is a `Text` cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List items, if this is a `List` cell
    pub fn as_list(&self) -> Option<&[Option<String>]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl fmt::Display for Value {
    /// CSV rendering: empty for `Null`, list items joined with [`LIST_SEPARATOR`]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                let joined: Vec<&str> = items.iter().flatten().map(String::as_str).collect();
                f.write_str(&joined.join(LIST_SEPARATOR))
            }
        }
    }
}

/// One output row: column name → cell, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, Value>,
}

impl Row {
    /// Empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, replacing any previous value for that column
    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.cells.insert(column.into(), value);
    }

    /// Cell for `column`; absent columns read as `Null`
    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&NULL)
    }

    /// Columns present in this row
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// Ordered table of extraction rows.
///
/// Rows may populate different columns; the table's columns are the union of
/// every row's columns in first-seen order, and a column missing from a row
/// reads as `Null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table with the given columns declared up front
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, registering any columns not seen before
    pub fn push(&mut self, row: Row) {
        for column in row.columns() {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push(column.to_string());
            }
        }
        self.rows.push(row);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Every cell of one column, top to bottom
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }

    /// One row per element of the list column `column`.
    ///
    /// Each list item becomes a `Text` (or `Null`) cell in its own row, with
    /// the other cells repeated. An empty list still yields one row, holding
    /// `Null`. Rows whose cell is not a list are kept as they are.
    pub fn explode(&self, column: &str) -> Table {
        let mut exploded = Table::with_columns(self.columns.iter().cloned());
        for row in &self.rows {
            match row.get(column) {
                Value::List(items) if items.is_empty() => {
                    let mut copy = row.clone();
                    copy.insert(column, Value::Null);
                    exploded.push(copy);
                }
                Value::List(items) => {
                    for item in items {
                        let mut copy = row.clone();
                        copy.insert(column, Value::from_option(item.as_deref()));
                        exploded.push(copy);
                    }
                }
                _ => exploded.push(row.clone()),
            }
        }
        exploded
    }

    /// Rows as JSON objects carrying every table column
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .map(|c| {
                        let value = serde_json::to_value(row.get(c)).unwrap_or_default();
                        (c.clone(), value)
                    })
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }

    /// Write as CSV with a header row
    pub fn write_csv<W: Write>(&self, out: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(self.columns.iter().map(|c| row.get(c).to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        let mut table = Table::new();
        for row in iter {
            table.push(row);
        }
        table
    }
}
