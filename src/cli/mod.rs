use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use drugbank::database::DrugBank;
use drugbank::extract::Table;

mod extract;
mod info;
mod mock;
mod pathways;

mod config;

pub use config::Config;

/// DrugBank XML extraction and mock database generator
#[derive(Parser)]
#[command(name = "drugbank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Serialization of table output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header row (lists joined with ';')
    #[default]
    Csv,
    /// JSON array of row objects
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a mock database from real and synthetic records
    Mock {
        /// Source DrugBank XML file
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output XML file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of synthetic records to generate
        #[arg(long, value_name = "N")]
        mock_entries: Option<usize>,

        /// Number of real records to include
        #[arg(long, value_name = "N")]
        real_entries: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Only draw flat fields; skip nested field reconstruction
        #[arg(long)]
        flat: bool,
    },

    /// Extract fields from every drug record into a table
    Extract {
        /// DrugBank XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Path from each drug to the row anchors ('.' for one row per drug)
        #[arg(long, default_value = ".")]
        prefix: String,

        /// Single-valued field as NAME=PATH (repeatable)
        #[arg(long = "simple", value_name = "NAME=PATH", value_parser = parse_field)]
        simple: Vec<(String, String)>,

        /// Multi-valued field as NAME=PATH (repeatable)
        #[arg(long = "nested", value_name = "NAME=PATH", value_parser = parse_field)]
        nested: Vec<(String, String)>,

        /// Omit the drug name column
        #[arg(long)]
        no_name: bool,

        /// Omit the drug id column
        #[arg(long)]
        no_id: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the identifier → name index
    Ids {
        /// DrugBank XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print one row per drug target polypeptide
    Proteins {
        /// DrugBank XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Count pathways linked to each drug identifier
    Pathways {
        /// DrugBank XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Only report these identifiers (repeatable)
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,
    },

    /// Display a summary of a DrugBank file
    Info {
        /// DrugBank XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let default_format = config.extract.format.unwrap_or_default();

    match cli.command {
        Commands::Mock {
            input,
            output,
            mock_entries,
            real_entries,
            seed,
            flat,
        } => mock::run(
            &config.mock,
            input,
            output,
            mock_entries,
            real_entries,
            seed,
            flat,
        ),
        Commands::Extract {
            input,
            prefix,
            simple,
            nested,
            no_name,
            no_id,
            format,
            output,
        } => extract::run(
            input,
            extract::Fields {
                prefix,
                simple,
                nested,
                no_name,
                no_id,
            },
            format.unwrap_or(default_format),
            output,
        ),
        Commands::Ids { input, format } => {
            extract::ids(input, format.unwrap_or(default_format))
        }
        Commands::Proteins { input, format } => {
            extract::proteins(input, format.unwrap_or(default_format))
        }
        Commands::Pathways { input, ids } => pathways::run(input, ids),
        Commands::Info { input } => info::run(input),
    }
}

/// Parse a `NAME=PATH` field argument
fn parse_field(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), path.to_string()))
        }
        _ => Err(format!("expected NAME=PATH, got '{arg}'")),
    }
}

/// Fail early with a readable message when an input file is missing
pub(crate) fn require_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }
    Ok(())
}

/// Load a DrugBank file with context on failure
pub(crate) fn load_database(input: &Path) -> Result<DrugBank> {
    require_file(input)?;
    DrugBank::from_path(input)
        .with_context(|| format!("Failed to load DrugBank file: {}", input.display()))
}

/// Write a table to `output` (or stdout) in the requested format
pub(crate) fn write_table(table: &Table, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = BufWriter::new(sink);

    match format {
        OutputFormat::Csv => table.write_csv(&mut sink).context("Failed to write CSV")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut sink, &table.to_json())
                .context("Failed to write JSON")?;
            writeln!(sink)?;
        }
    }
    sink.flush().context("Failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("target-name=db:name").unwrap(),
            ("target-name".to_string(), "db:name".to_string())
        );
        // Only the first '=' splits; predicates may contain more
        assert_eq!(
            parse_field("primary=db:drugbank-id[@primary='true']").unwrap().1,
            "db:drugbank-id[@primary='true']"
        );
        assert!(parse_field("nopath").is_err());
        assert!(parse_field("=db:name").is_err());
    }

    #[test]
    fn test_cli_parses_extract() {
        let cli = Cli::try_parse_from([
            "drugbank",
            "-vv",
            "extract",
            "drugbank.xml",
            "--prefix",
            "db:targets/db:target",
            "--simple",
            "target-name=db:name",
            "--nested",
            "ids=db:polypeptide/db:external-identifiers/db:external-identifier/db:identifier",
            "--no-id",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbosity(), 2);
        match cli.command {
            Commands::Extract {
                simple,
                nested,
                no_id,
                no_name,
                format,
                ..
            } => {
                assert_eq!(simple.len(), 1);
                assert_eq!(nested[0].0, "ids");
                assert!(no_id);
                assert!(!no_name);
                assert_eq!(format, Some(OutputFormat::Json));
            }
            _ => panic!("expected extract command"),
        }
    }
}
