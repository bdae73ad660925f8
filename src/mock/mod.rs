//! # Mock Database Generation
//!
//! Produces a drop-in stand-in for a DrugBank export: a random sample of
//! real records, deep-copied and untouched, followed by synthetic records
//! drawn from the source's [`Catalog`](crate::catalog::Catalog).
//!
//! ```rust,no_run
//! use drugbank::mock::{generate_mock_database, MockConfig};
//!
//! let config = MockConfig::default().with_mock_entries(20).with_seed(42);
//! let summary = generate_mock_database(
//!     "data/drugbank_partial.xml",
//!     "data/mock_drugbank.xml",
//!     &config,
//! )?;
//! println!("{} real + {} synthetic", summary.real_entries, summary.mock_entries);
//! # Ok::<(), drugbank::mock::MockError>(())
//! ```

use std::path::Path;

use chrono::NaiveDate;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::database::DrugBank;
use crate::synth::{default_synthesis_date, Synthesizer};
use crate::tree::{Element, TreeWriter};

mod error;


pub use error::MockError;

/// Default number of synthetic records
pub const DEFAULT_MOCK_ENTRIES: usize = 10;
/// Default number of sampled real records
pub const DEFAULT_REAL_ENTRIES: usize = 5;

/// Settings for [`generate_mock_database`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// Real records to sample (capped at the number available)
    pub real_entries: usize,
    /// Synthetic records to append
    pub mock_entries: usize,
    /// Seed for reproducible output; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Creation/update date stamped on synthetic records
    pub synthesis_date: NaiveDate,
    /// Rebuild nested fields in synthetic records
    pub nested: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            real_entries: DEFAULT_REAL_ENTRIES,
            mock_entries: DEFAULT_MOCK_ENTRIES,
            seed: None,
            synthesis_date: default_synthesis_date(),
            nested: true,
        }
    }
}

impl MockConfig {
    /// Set the number of real records
    pub fn with_real_entries(mut self, n: usize) -> Self {
        self.real_entries = n;
        self
    }

    /// Set the number of synthetic records
    pub fn with_mock_entries(mut self, n: usize) -> Self {
        self.mock_entries = n;
        self
    }

    /// Seed the random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the synthesis date
    pub fn with_synthesis_date(mut self, date: NaiveDate) -> Self {
        self.synthesis_date = date;
        self
    }

    /// Enable or disable nested reconstruction
    pub fn with_nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// Random source for this configuration
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// What a mock generation run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSummary {
    /// Real records copied
    pub real_entries: usize,
    /// Synthetic records appended
    pub mock_entries: usize,
}

/// Pick `min(count, records.len())` records uniformly without replacement.
///
/// The result follows sampling order, not document order.
pub fn sample_records<'a, R: Rng + ?Sized>(
    records: &[&'a Element],
    count: usize,
    rng: &mut R,
) -> Vec<&'a Element> {
    let amount = count.min(records.len());
    if amount < count {
        warn!(
            "Requested {} real entries but only {} available",
            count,
            records.len()
        );
    }
    index::sample(rng, records.len(), amount)
        .into_iter()
        .map(|i| records[i])
        .collect()
}

/// Build the output root: source tag and attributes, deep copies of `real`,
/// then `synthetic`.
pub fn assemble(source: &Element, real: &[&Element], synthetic: Vec<Element>) -> Element {
    let mut root = Element::new(source.name.clone());
    root.attributes = source.attributes.clone();
    root.children.reserve(real.len() + synthetic.len());
    root.children.extend(real.iter().map(|&drug| drug.clone()));
    root.children.extend(synthetic);
    root
}

/// Sample, synthesize and assemble a mock root from `db`
pub fn build_mock<R: Rng + ?Sized>(db: &DrugBank, config: &MockConfig, rng: &mut R) -> Element {
    let catalog = db.catalog();
    let real = sample_records(&db.drugs(), config.real_entries, rng);
    let synthetic = Synthesizer::new(&catalog)
        .with_date(config.synthesis_date)
        .with_nested(config.nested)
        .synthesize(config.mock_entries, rng);

    info!(
        "Assembled {} real + {} synthetic records",
        real.len(),
        synthetic.len()
    );
    assemble(db.root(), &real, synthetic)
}

/// Load `input`, build a mock database and write it to `output`
pub fn generate_mock_database<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &MockConfig,
) -> Result<MockSummary, MockError> {
    let db = DrugBank::from_path(input)?;
    let mut rng = config.rng();
    let root = build_mock(&db, config, &mut rng);

    let mock_entries = config.mock_entries;
    let summary = MockSummary {
        real_entries: root.children.len() - mock_entries,
        mock_entries,
    };

    let output = output.as_ref();
    TreeWriter::new(db.namespaces()).write_file(&root, output)?;
    info!("Mock database written to {}", output.display());
    Ok(summary)
}
