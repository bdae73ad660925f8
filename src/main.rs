//! # DrugBank Tool
//!
//! Command-line front end for the `drugbank` library.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a mock database (5 real + 10 synthetic records)
//! drugbank mock --input data/drugbank_partial.xml --output data/mock_drugbank.xml
//!
//! # One row per target with its external identifiers
//! drugbank extract data/drugbank_partial.xml --prefix db:targets/db:target \
//!     --simple target-name=db:name \
//!     --nested ids=db:polypeptide/db:external-identifiers/db:external-identifier/db:identifier
//!
//! # Pathway counts for one identifier
//! drugbank pathways data/drugbank_partial.xml --id DB00001
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
