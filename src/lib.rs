//! # drugbank - DrugBank XML extraction and mock database synthesis
//!
//! `drugbank` loads a namespace-qualified DrugBank XML export into memory and
//! offers two things on top of it:
//!
//! - **Field extraction**: flatten repeated drug records (and sub-records such
//!   as targets or pathways) into ordered tables using small relative field
//!   paths, then join and aggregate those tables.
//!
//! - **Mock databases**: build a realistic-looking stand-in document from a
//!   sample of real records plus synthetic ones, each synthetic field drawn
//!   independently from the values observed in the source.
//!
//! ## Quick Start - Extraction
//!
//! ```rust,no_run
//! use drugbank::prelude::*;
//!
//! let db = DrugBank::from_path("data/drugbank_partial.xml")?;
//!
//! // One row per target, with the target name and its external identifiers
//! let spec = ExtractionSpec::new("db:targets/db:target")
//!     .simple("target-name", "db:name")
//!     .nested(
//!         "external-ids",
//!         "db:polypeptide/db:external-identifiers/db:external-identifier/db:identifier",
//!     );
//! let table = db.extract(&spec)?;
//! table.write_csv(std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Quick Start - Mock Database
//!
//! ```rust,no_run
//! use drugbank::mock::{generate_mock_database, MockConfig};
//!
//! let config = MockConfig::default()
//!     .with_real_entries(5)
//!     .with_mock_entries(10)
//!     .with_seed(7);
//! generate_mock_database("data/drugbank_partial.xml", "data/mock_drugbank.xml", &config)?;
//! # Ok::<(), drugbank::mock::MockError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`tree`]: owned XML tree, loader, field paths and serializer
//! - [`database`]: the loaded document and per-record accessors
//! - [`extract`]: field-path extraction, identity index, tables
//! - [`aggregate`]: joins and counts over extraction output
//! - [`catalog`]: observed field values, the sampling universe for synthesis
//! - [`synth`]: synthetic record construction
//! - [`mock`]: real-sample + synthetic document assembly
//! - [`report`]: human-readable document summary

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod aggregate;
pub mod catalog;
pub mod database;
pub mod extract;
pub mod mock;
pub mod report;
pub mod synth;
pub mod tree;

#[cfg(test)]
mod fixtures;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::aggregate::{pathway_counts, LinkCounts, LookupError, PathwayCountService};
    pub use crate::catalog::{Catalog, CatalogEntry, NestedTemplate};
    pub use crate::database::{DatabaseError, DrugBank};
    pub use crate::extract::{
        ExtractError, ExtractionSpec, Extractor, IdentityIndex, Row, Table, Value,
    };
    pub use crate::mock::{generate_mock_database, MockConfig, MockError, MockSummary};
    pub use crate::report::DatabaseSummary;
    pub use crate::synth::Synthesizer;
    pub use crate::tree::{Element, FieldPath, Namespaces, PathError, QName, TreeError};
}
