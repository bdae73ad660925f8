use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use drugbank::mock::{generate_mock_database, MockConfig};

use super::config::MockSection;
use super::require_file;

/// Default source database
pub const DEFAULT_INPUT: &str = "data/drugbank_partial.xml";
/// Default mock database destination
pub const DEFAULT_OUTPUT: &str = "data/mock_drugbank.xml";

/// Generate a mock database
pub fn run(
    file_config: &MockSection,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    mock_entries: Option<usize>,
    real_entries: Option<usize>,
    seed: Option<u64>,
    flat: bool,
) -> Result<()> {
    // Precedence: CLI flags > config file > built-in defaults
    let input = input
        .or_else(|| file_config.input.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = output
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let defaults = MockConfig::default();
    let config = MockConfig {
        real_entries: real_entries
            .or(file_config.real_entries)
            .unwrap_or(defaults.real_entries),
        mock_entries: mock_entries
            .or(file_config.mock_entries)
            .unwrap_or(defaults.mock_entries),
        seed: seed.or(file_config.seed),
        synthesis_date: file_config
            .synthesis_date
            .unwrap_or(defaults.synthesis_date),
        nested: !flat && file_config.nested.unwrap_or(defaults.nested),
    };

    require_file(&input)?;

    info!("DrugBank Mock Generator");
    info!("=======================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Real entries: {}", config.real_entries);
    info!("Mock entries: {}", config.mock_entries);
    if let Some(seed) = config.seed {
        info!("Seed: {}", seed);
    }
    info!("Synthesis date: {}", config.synthesis_date);
    info!("Nested fields: {}", if config.nested { "yes" } else { "no" });

    let summary = generate_mock_database(&input, &output, &config)
        .with_context(|| format!("Failed to generate mock database from {}", input.display()))?;

    println!(
        "Wrote {} ({} real, {} synthetic records)",
        output.display(),
        summary.real_entries,
        summary.mock_entries
    );
    Ok(())
}
