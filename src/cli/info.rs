use anyhow::Result;
use std::path::PathBuf;

use drugbank::report::DatabaseSummary;

use super::load_database;

/// Display a summary of a DrugBank file
pub fn run(input: PathBuf) -> Result<()> {
    let db = load_database(&input)?;
    let summary = DatabaseSummary::new(&db, input.display().to_string());
    print!("{}", summary.format_colored());
    Ok(())
}
