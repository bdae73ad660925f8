//! # XML Tree Module
//!
//! In-memory representation of a namespace-qualified XML document, with a
//! quick-xml based loader, a relative path matcher and an indenting writer.
//!
//! ## DrugBank Export Structure
//!
//! ```text
//! drugbank (xmlns="http://www.drugbank.ca", version, exported-on)
//! └── drug* (type, created, updated)
//!     ├── drugbank-id* (one with primary="true")
//!     ├── name
//!     ├── description, cas-number, ... (scalar fields)
//!     ├── synonyms / categories / ... (wrapper with repeated children)
//!     ├── pathways
//!     │   └── pathway*
//!     │       ├── name
//!     │       └── drugs/drug*/name
//!     └── targets
//!         └── target*
//!             ├── id, name
//!             └── polypeptide (id, source)
//!                 └── external-identifiers/external-identifier*
//! ```
//!
//! The whole document is held in memory; there is no streaming mode.

use std::io::BufRead;
use std::path::Path;

pub use element::{Attribute, Descendants, Element, QName, XmlNode};
pub use error::{PathError, TreeError};
pub use loader::TreeLoader;
pub use namespace::{Namespaces, DRUGBANK_NS, DRUGBANK_PREFIX, XSI_NS, XSI_PREFIX};
pub use path::FieldPath;
pub use writer::{TreeWriter, INDENT_WIDTH};

mod element;
mod error;
mod loader;
mod namespace;
mod path;
mod writer;


/// Load a document from a file and return its root element
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Element, TreeError> {
    TreeLoader::from_path(path)?.load()
}

/// Load a document from any buffered reader
pub fn load_reader<R: BufRead>(reader: R) -> Result<Element, TreeError> {
    TreeLoader::new(reader).load()
}

/// Load a document from a string
pub fn load_str(xml: &str) -> Result<Element, TreeError> {
    TreeLoader::from_str(xml).load()
}
