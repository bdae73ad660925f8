//! # Mock Record Synthesis
//!
//! Fabricates drug records by drawing every field independently and
//! uniformly from a [`Catalog`]. Identifiers are sequential (`MOCK00001`,
//! `MOCK00002`, ...); everything else comes from the random source the
//! caller passes in, so a seeded `StdRng` gives reproducible output.
//!
//! Fields are drawn independently. A synthetic record's type, name and
//! other fields need not be consistent with each other.

use chrono::NaiveDate;
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::{Catalog, CatalogEntry, NestedTemplate};
use crate::tree::{Element, QName};

#[cfg(test)]
mod tests;

/// Types used when the catalog observed none
pub const FALLBACK_TYPES: [&str; 2] = ["biotech", "small molecule"];
/// Prefix of synthetic identifiers
pub const MOCK_ID_PREFIX: &str = "MOCK";
/// Flat tags never drawn from the catalog (the identifier is assigned instead)
pub const RESERVED_FIELDS: [&str; 1] = ["drugbank-id"];

/// Default creation/update date stamped on synthetic records
pub fn default_synthesis_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Identifier for the `ordinal`-th synthetic record (1-based)
pub fn mock_id(ordinal: usize) -> String {
    format!("{MOCK_ID_PREFIX}{ordinal:05}")
}

/// Builds synthetic records from a catalog
#[derive(Debug, Clone)]
pub struct Synthesizer<'a> {
    catalog: &'a Catalog,
    date: NaiveDate,
    nested: bool,
}

impl<'a> Synthesizer<'a> {
    /// Synthesizer with the default date and nested reconstruction enabled
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            date: default_synthesis_date(),
            nested: true,
        }
    }

    /// Builder: set the creation/update date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Builder: enable or disable nested field reconstruction
    pub fn with_nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// Records `1..=count`, in ordinal order
    pub fn synthesize<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Element> {
        let records: Vec<Element> = (1..=count).map(|i| self.record(i, rng)).collect();
        debug!("Synthesized {} records", records.len());
        records
    }

    /// One record with identifier [`mock_id(ordinal)`](mock_id)
    pub fn record<R: Rng + ?Sized>(&self, ordinal: usize, rng: &mut R) -> Element {
        let date = self.date.to_string();
        let mut drug = Element::new(QName::drugbank("drug"))
            .with_attribute("type", self.draw_type(rng))
            .with_attribute("created", date.as_str())
            .with_attribute("updated", date);

        drug.push(
            Element::new(QName::drugbank("drugbank-id"))
                .with_attribute("primary", "true")
                .with_text(mock_id(ordinal)),
        );

        for (tag, values) in self.catalog.fields() {
            if RESERVED_FIELDS.contains(&tag.as_str()) {
                continue;
            }
            // Structure wins when a tag was also seen as a container
            if self.nested && self.catalog.nested().contains_key(tag) {
                continue;
            }
            if let Some(value) = values.choose(rng) {
                drug.push(Element::new(QName::drugbank(tag.as_str())).with_text(value.as_str()));
            }
        }

        if self.nested {
            for (tag, template) in self.catalog.nested() {
                if let Some(field) = rebuild(tag, template, rng) {
                    drug.push(field);
                }
            }
        }

        drug
    }

    fn draw_type<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let observed = self.catalog.types();
        if observed.is_empty() {
            FALLBACK_TYPES.choose(rng).copied().unwrap_or_default().to_string()
        } else {
            observed.choose(rng).cloned().unwrap_or_default()
        }
    }
}

/// Rebuild one nested field, or `None` if no sub-field has a value to draw
fn rebuild<R: Rng + ?Sized>(tag: &str, template: &NestedTemplate, rng: &mut R) -> Option<Element> {
    let mut element = Element::new(QName::drugbank(tag));
    for (sub_tag, entry) in template.fields() {
        let child = match entry {
            CatalogEntry::Nested(sub) => rebuild(sub_tag, sub, rng),
            CatalogEntry::Values(values) => values
                .choose(rng)
                .map(|v| Element::new(QName::drugbank(sub_tag)).with_text(v.as_str())),
        };
        if let Some(child) = child {
            element.push(child);
        }
    }
    element.has_children().then_some(element)
}
