use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use drugbank::extract::ExtractionSpec;

use super::{load_database, write_table, OutputFormat};

/// Field selection for the extract command
pub struct Fields {
    pub prefix: String,
    pub simple: Vec<(String, String)>,
    pub nested: Vec<(String, String)>,
    pub no_name: bool,
    pub no_id: bool,
}

impl Fields {
    fn into_spec(self) -> ExtractionSpec {
        let mut spec = ExtractionSpec::new(self.prefix);
        for (name, path) in self.simple {
            spec = spec.simple(name, path);
        }
        for (name, path) in self.nested {
            spec = spec.nested(name, path);
        }
        if self.no_name {
            spec = spec.name_column(None);
        }
        if self.no_id {
            spec = spec.id_column(None);
        }
        spec
    }
}

/// Run a generic extraction
pub fn run(
    input: PathBuf,
    fields: Fields,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let db = load_database(&input)?;
    let spec = fields.into_spec();
    let table = db.extract(&spec).context("Invalid field path")?;

    info!("Extracted {} rows with columns {:?}", table.len(), table.columns());
    write_table(&table, format, output.as_deref())?;
    if let Some(path) = output {
        info!("Output: {}", path.display());
    }
    Ok(())
}

/// Print the identity index
pub fn ids(input: PathBuf, format: OutputFormat) -> Result<()> {
    let db = load_database(&input)?;
    let table = db.identity_index().to_table();
    write_table(&table, format, None)
}

/// Print the protein table
pub fn proteins(input: PathBuf, format: OutputFormat) -> Result<()> {
    let db = load_database(&input)?;
    let table = db
        .extract_proteins()
        .context("Failed to extract proteins")?;
    info!("Extracted {} protein rows", table.len());
    write_table(&table, format, None)
}
