//! # Field-Path Extraction
//!
//! Projects every drug record onto flat rows. An [`ExtractionSpec`] names a
//! *prefix path* that selects zero or more anchor elements per record (one
//! row per anchor), plus *simple* fields (first matching text, or `Null`) and
//! *nested* fields (every matching text, in document order) resolved relative
//! to each anchor.
//!
//! ```rust,no_run
//! use drugbank::database::DrugBank;
//! use drugbank::extract::ExtractionSpec;
//!
//! let db = DrugBank::from_path("data/drugbank_partial.xml")?;
//! let spec = ExtractionSpec::new("db:targets/db:target")
//!     .simple("target-name", "db:name")
//!     .nested(
//!         "external-ids",
//!         "db:polypeptide/db:external-identifiers/db:external-identifier/db:identifier",
//!     );
//! let table = db.extract(&spec)?;
//! println!("{} target rows", table.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Records without a primary identifier or without a name never produce rows.

use indexmap::IndexMap;
use log::debug;

use crate::database::DrugBank;
use crate::tree::{FieldPath, PathError};

pub use identity::{IdentityIndex, ID_COLUMN, NAME_COLUMN};
pub use proteins::{CHROMOSOME_PATTERN, GENATLAS_RESOURCE, PROTEIN_COLUMNS};
pub use table::{Row, Table, Value, LIST_SEPARATOR};

mod identity;
mod proteins;
mod table;

#[cfg(test)]
mod tests;

/// Default column for the record's display name
pub const DEFAULT_NAME_COLUMN: &str = "name";
/// Default column for the record's primary identifier
pub const DEFAULT_ID_COLUMN: &str = "drugbank-id";

/// Errors that can occur while preparing an extraction
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// A field or prefix path did not compile
    #[error("Invalid field path: {0}")]
    Path(#[from] PathError),

    /// A value pattern did not compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// What to extract from each record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSpec {
    /// Path from the record to the row anchors
    pub prefix: String,
    /// Column → path resolved to at most one text value
    pub simple_fields: IndexMap<String, String>,
    /// Column → path resolved to every matching text value
    pub nested_fields: IndexMap<String, String>,
    /// Column for the record name (`None` omits it)
    pub name_column: Option<String>,
    /// Column for the primary identifier (`None` omits it)
    pub id_column: Option<String>,
}

impl ExtractionSpec {
    /// Spec with the given prefix path and the default name/id columns
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            simple_fields: IndexMap::new(),
            nested_fields: IndexMap::new(),
            name_column: Some(DEFAULT_NAME_COLUMN.to_string()),
            id_column: Some(DEFAULT_ID_COLUMN.to_string()),
        }
    }

    /// Add a simple field
    pub fn simple(mut self, column: impl Into<String>, path: impl Into<String>) -> Self {
        self.simple_fields.insert(column.into(), path.into());
        self
    }

    /// Add a nested field
    pub fn nested(mut self, column: impl Into<String>, path: impl Into<String>) -> Self {
        self.nested_fields.insert(column.into(), path.into());
        self
    }

    /// Set or clear the name column
    pub fn name_column(mut self, column: Option<&str>) -> Self {
        self.name_column = column.map(str::to_string);
        self
    }

    /// Set or clear the id column
    pub fn id_column(mut self, column: Option<&str>) -> Self {
        self.id_column = column.map(str::to_string);
        self
    }

    /// Columns produced by this spec, in row order
    pub fn columns(&self) -> Vec<String> {
        self.name_column
            .iter()
            .chain(self.id_column.iter())
            .chain(self.simple_fields.keys())
            .chain(self.nested_fields.keys())
            .cloned()
            .collect()
    }
}

/// An [`ExtractionSpec`] compiled against one document
pub struct Extractor<'a> {
    db: &'a DrugBank,
    spec: &'a ExtractionSpec,
    prefix: FieldPath,
    simple: Vec<(&'a str, FieldPath)>,
    nested: Vec<(&'a str, FieldPath)>,
}

impl<'a> Extractor<'a> {
    /// Compile every path in `spec`
    pub fn new(db: &'a DrugBank, spec: &'a ExtractionSpec) -> Result<Self, PathError> {
        let compile = |fields: &'a IndexMap<String, String>| {
            fields
                .iter()
                .map(|(column, path)| Ok((column.as_str(), db.path(path)?)))
                .collect::<Result<Vec<_>, PathError>>()
        };

        let extractor = Self {
            db,
            spec,
            prefix: db.path(&spec.prefix)?,
            simple: compile(&spec.simple_fields)?,
            nested: compile(&spec.nested_fields)?,
        };
        debug!(
            "Compiled extraction: prefix {}, {} simple, {} nested",
            extractor.prefix,
            extractor.simple.len(),
            extractor.nested.len()
        );
        Ok(extractor)
    }

    /// Run over every record and collect the rows
    pub fn run(&self) -> Table {
        let mut table = Table::with_columns(self.spec.columns());
        let mut skipped = 0usize;

        for drug in self.db.drugs() {
            let Some(id) = self.db.primary_id(drug) else {
                skipped += 1;
                continue;
            };
            let Some(name) = self.db.name(drug) else {
                skipped += 1;
                continue;
            };

            for anchor in self.prefix.select(drug) {
                let mut row = Row::new();
                if let Some(column) = &self.spec.name_column {
                    row.insert(column.as_str(), Value::text(name));
                }
                if let Some(column) = &self.spec.id_column {
                    row.insert(column.as_str(), Value::text(id));
                }
                for (column, path) in &self.simple {
                    row.insert(*column, Value::from_option(path.first_text(anchor)));
                }
                for (column, path) in &self.nested {
                    row.insert(*column, Value::list(path.texts(anchor)));
                }
                table.push(row);
            }
        }

        debug!(
            "Extracted {} rows along {} ({} records without id or name)",
            table.len(),
            self.prefix,
            skipped
        );
        table
    }
}

impl DrugBank {
    /// Extract rows according to `spec`
    pub fn extract(&self, spec: &ExtractionSpec) -> Result<Table, PathError> {
        Ok(Extractor::new(self, spec)?.run())
    }

    /// Build the id → name index over every record
    pub fn identity_index(&self) -> IdentityIndex {
        IdentityIndex::build(self)
    }
}
