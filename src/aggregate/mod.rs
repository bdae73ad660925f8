//! # Relational Aggregators
//!
//! Derived metrics built from extraction output: extract a 1:N relation,
//! explode it to one linked name per row, join on name against the
//! [`IdentityIndex`], then count and sort.
//!
//! [`pathway_counts`] instantiates this for "how many pathways mention each
//! drug identifier". [`PathwayCountService`] holds that result for repeated
//! [`lookup`](PathwayCountService::lookup) calls.

use std::collections::HashMap;
use std::sync::OnceLock;

use indexmap::IndexMap;
use log::{debug, info};

use crate::database::DrugBank;
use crate::extract::{ExtractionSpec, IdentityIndex, Row, Table, Value};
use crate::tree::PathError;


/// Prefix path of pathway records inside a drug
pub const PATHWAY_PATH: &str = "db:pathways/db:pathway";
/// Name of each drug linked from a pathway
pub const PATHWAY_DRUG_PATH: &str = "db:drugs/db:drug/db:name";
/// Column holding the pathway name
pub const PATHWAY_NAME_COLUMN: &str = "pathway-name";
/// Column holding the linked drug names
pub const PATHWAY_DRUGS_COLUMN: &str = "drugs";
/// Column holding the count in [`LinkCounts::to_table`]
pub const COUNT_COLUMN: &str = "count";

/// Errors at the lookup boundary
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The identifier is not in the identity index
    #[error("Identifier not found: {0}")]
    NotFound(String),

    /// The backing extraction could not be compiled
    #[error("Aggregation failed: {0}")]
    Path(#[from] PathError),
}

/// Per-identifier link counts, sorted by descending count.
///
/// Identifiers with equal counts keep their identity-index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCounts {
    counts: IndexMap<String, usize>,
}

impl LinkCounts {
    /// Count for an identifier; `None` if the identifier is unknown
    pub fn lookup(&self, id: &str) -> Option<usize> {
        self.counts.get(id).copied()
    }

    /// `(id, count)` pairs, highest count first
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(id, n)| (id.as_str(), *n))
    }

    /// Number of identifiers
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no identifiers were counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Two-column `id`/`count` table
    pub fn to_table(&self) -> Table {
        let mut table = Table::with_columns([crate::extract::ID_COLUMN, COUNT_COLUMN]);
        for (id, count) in self.iter() {
            table.push(Row::from_iter([
                (crate::extract::ID_COLUMN, Value::text(id)),
                (COUNT_COLUMN, Value::text(count.to_string())),
            ]));
        }
        table
    }
}

/// Join `links` against `index` on name and count linked values per identifier.
///
/// `name_column` must hold one scalar name per row, i.e. an already exploded
/// table. A row counts only when its `value_column` is non-null. Every
/// identifier in the index appears in the result, with 0 when nothing links
/// to its name. Names that match no identifier are dropped.
pub fn count_links(
    index: &IdentityIndex,
    links: &Table,
    name_column: &str,
    value_column: &str,
) -> LinkCounts {
    let mut per_name: HashMap<&str, usize> = HashMap::new();
    for row in links.rows() {
        if row.get(value_column).is_null() {
            continue;
        }
        if let Some(name) = row.get(name_column).as_text() {
            *per_name.entry(name).or_default() += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = index
        .iter()
        .map(|(id, name)| (id.to_string(), per_name.get(name).copied().unwrap_or(0)))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    LinkCounts {
        counts: counts.into_iter().collect(),
    }
}

/// Number of pathways linking to each drug identifier.
///
/// Pathway drugs are matched by name, so every identifier of a drug shares
/// that drug's count. Pathways without a name are not counted.
pub fn pathway_counts(db: &DrugBank) -> Result<LinkCounts, PathError> {
    let spec = ExtractionSpec::new(PATHWAY_PATH)
        .simple(PATHWAY_NAME_COLUMN, "db:name")
        .nested(PATHWAY_DRUGS_COLUMN, PATHWAY_DRUG_PATH)
        .name_column(None)
        .id_column(None);

    let links = db.extract(&spec)?.explode(PATHWAY_DRUGS_COLUMN);
    debug!("Pathway links: {} rows", links.len());

    let counts = count_links(
        &db.identity_index(),
        &links,
        PATHWAY_DRUGS_COLUMN,
        PATHWAY_NAME_COLUMN,
    );
    info!("Counted pathway links for {} identifiers", counts.len());
    Ok(counts)
}

/// Serving-layer state: a loaded document plus pathway counts computed once.
///
/// The counts are built on the first call to [`counts`](Self::counts) or
/// [`lookup`](Self::lookup) and kept for the lifetime of the service. They
/// are never invalidated.
#[derive(Debug)]
pub struct PathwayCountService {
    db: DrugBank,
    counts: OnceLock<LinkCounts>,
}

impl PathwayCountService {
    /// Wrap a loaded document; nothing is computed yet
    pub fn new(db: DrugBank) -> Self {
        Self {
            db,
            counts: OnceLock::new(),
        }
    }

    /// Compute the counts now instead of on first lookup
    pub fn eager(db: DrugBank) -> Result<Self, PathError> {
        let service = Self::new(db);
        service.counts()?;
        Ok(service)
    }

    /// The underlying document
    pub fn database(&self) -> &DrugBank {
        &self.db
    }

    /// All counts, building them on first access
    pub fn counts(&self) -> Result<&LinkCounts, PathError> {
        if let Some(counts) = self.counts.get() {
            return Ok(counts);
        }
        let counts = pathway_counts(&self.db)?;
        Ok(self.counts.get_or_init(|| counts))
    }

    /// Pathway count for `id`; unknown identifiers are `NotFound`, never 0
    pub fn lookup(&self, id: &str) -> Result<usize, LookupError> {
        self.counts()?
            .lookup(id)
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }
}
