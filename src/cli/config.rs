//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in a
//! config file. Command-line flags override file values.
//!
//! ```toml
//! # drugbank.toml
//! [mock]
//! input = "data/drugbank_partial.xml"
//! output = "data/mock_drugbank.xml"
//! mock_entries = 10
//! real_entries = 5
//! seed = 42
//! synthesis_date = "2025-01-01"
//! nested = true
//!
//! [extract]
//! format = "json"
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::OutputFormat;

/// Root configuration structure for drugbank.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Mock generation settings.
    #[serde(default)]
    pub mock: MockSection,

    /// Extraction output settings.
    #[serde(default)]
    pub extract: ExtractSection,
}

/// Configuration for the mock command.
#[derive(Debug, Default, Deserialize)]
pub struct MockSection {
    /// Source DrugBank XML file.
    pub input: Option<PathBuf>,

    /// Destination for the mock database.
    pub output: Option<PathBuf>,

    /// Number of synthetic records.
    pub mock_entries: Option<usize>,

    /// Number of real records to sample.
    pub real_entries: Option<usize>,

    /// Seed for reproducible output.
    pub seed: Option<u64>,

    /// Creation/update date of synthetic records.
    pub synthesis_date: Option<NaiveDate>,

    /// Rebuild nested fields in synthetic records.
    pub nested: Option<bool>,
}

/// Configuration for table-producing commands.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractSection {
    /// Output format.
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file if a path was given, otherwise use an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
