use anyhow::{Context, Result};
use std::path::PathBuf;

use drugbank::aggregate::{LookupError, PathwayCountService};

use super::{load_database, write_table, OutputFormat};

/// Print pathway counts, either all of them or for selected identifiers
pub fn run(input: PathBuf, ids: Vec<String>) -> Result<()> {
    let service = PathwayCountService::new(load_database(&input)?);

    if ids.is_empty() {
        let counts = service.counts().context("Failed to count pathways")?;
        return write_table(&counts.to_table(), OutputFormat::Csv, None);
    }

    for id in &ids {
        match service.lookup(id) {
            Ok(count) => println!("{id}\t{count}"),
            Err(LookupError::NotFound(_)) => println!("{id}\tnot found"),
            Err(e) => return Err(e).context("Failed to count pathways"),
        }
    }
    Ok(())
}
