//! Loaded DrugBank document and per-record accessors.

use std::io::BufRead;
use std::path::Path;

use log::info;

use crate::tree::{self, Element, FieldPath, Namespaces, PathError, TreeError};

/// Path of the repeating record element, relative to the root
pub const DRUG_PATH: &str = "db:drug";
/// Path of the primary identifier, relative to a record
pub const PRIMARY_ID_PATH: &str = "db:drugbank-id[@primary='true']";
/// Path of every identifier, relative to a record
pub const ID_PATH: &str = "db:drugbank-id";
/// Path of the display name, relative to a record
pub const NAME_PATH: &str = "db:name";

/// Compiled record-level paths shared by extraction and indexing
#[derive(Debug, Clone)]
struct RecordPaths {
    drug: FieldPath,
    primary_id: FieldPath,
    ids: FieldPath,
    name: FieldPath,
}

impl RecordPaths {
    fn compile(namespaces: &Namespaces) -> Result<Self, PathError> {
        Ok(Self {
            drug: FieldPath::parse(DRUG_PATH, namespaces)?,
            primary_id: FieldPath::parse(PRIMARY_ID_PATH, namespaces)?,
            ids: FieldPath::parse(ID_PATH, namespaces)?,
            name: FieldPath::parse(NAME_PATH, namespaces)?,
        })
    }
}

/// Errors raised while opening a DrugBank document
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The document could not be loaded
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The namespace binding lacks a prefix used by the record paths
    #[error(transparent)]
    Path(#[from] PathError),
}

/// A DrugBank export held in memory.
///
/// Owns the document root and the namespace binding used to resolve field
/// paths. Extraction, indexing and catalog building all read from here.
#[derive(Debug, Clone)]
pub struct DrugBank {
    root: Element,
    namespaces: Namespaces,
    paths: RecordPaths,
}

impl DrugBank {
    /// Wrap an already loaded root using the default namespace binding
    pub fn new(root: Element) -> Result<Self, DatabaseError> {
        Self::with_namespaces(root, Namespaces::default())
    }

    /// Wrap a root with a custom namespace binding (must bind `db`)
    pub fn with_namespaces(root: Element, namespaces: Namespaces) -> Result<Self, DatabaseError> {
        let paths = RecordPaths::compile(&namespaces)?;
        Ok(Self {
            root,
            namespaces,
            paths,
        })
    }

    /// Load from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let db = Self::new(tree::load_path(path)?)?;
        info!(
            "Loaded {} with {} drug records",
            path.display(),
            db.drug_count()
        );
        Ok(db)
    }

    /// Load from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DatabaseError> {
        Self::new(tree::load_reader(reader)?)
    }

    /// Load from an XML string
    pub fn from_xml(xml: &str) -> Result<Self, DatabaseError> {
        Self::new(tree::load_str(xml)?)
    }

    /// Document root
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Namespace binding used for path resolution
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Compile a path against this document's namespace binding
    pub fn path(&self, expr: &str) -> Result<FieldPath, PathError> {
        FieldPath::parse(expr, &self.namespaces)
    }

    /// All record elements in document order
    pub fn drugs(&self) -> Vec<&Element> {
        self.paths.drug.select(&self.root)
    }

    /// Number of record elements
    pub fn drug_count(&self) -> usize {
        self.drugs().len()
    }

    /// Text of the identifier marked `primary="true"`
    pub fn primary_id<'a>(&self, drug: &'a Element) -> Option<&'a str> {
        self.paths.primary_id.first_text(drug)
    }

    /// Text of every identifier, primary or not, in document order
    pub fn ids<'a>(&self, drug: &'a Element) -> Vec<&'a str> {
        self.paths
            .ids
            .texts(drug)
            .into_iter()
            .flatten()
            .collect()
    }

    /// Display name of a record
    pub fn name<'a>(&self, drug: &'a Element) -> Option<&'a str> {
        self.paths.name.first_text(drug)
    }

    /// Consume the handle and return the root element
    pub fn into_root(self) -> Element {
        self.root
    }
}
