//! # Field Catalog
//!
//! Collects, per field tag, every non-empty value observed across all drug
//! records. The catalog is the sampling universe for [`crate::synth`].
//!
//! Three parts are built in one pass:
//!
//! - **flat fields**: tag → trimmed text values. Both direct children of a
//!   record and their children (grandchildren) feed this map, keyed by their
//!   own local name, so a tag seen at both depths collects values from both.
//! - **nested templates**: for each direct child that has child elements, a
//!   recursive [`NestedTemplate`] describing its sub-field vocabulary.
//! - **types**: distinct `type` attribute values, in first-seen order.
//!
//! A direct child with no child elements and non-empty text is flat; a
//! direct child with child elements is nested.

use indexmap::IndexMap;
use log::{debug, info};
use serde::Serialize;

use crate::database::DrugBank;
use crate::tree::Element;

#[cfg(test)]
mod tests;

/// Record attribute holding the drug type
pub const TYPE_ATTRIBUTE: &str = "type";

/// Observed values for a sub-field of a nested template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    /// Leaf values, in observation order
    Values(Vec<String>),
    /// A sub-field that itself contains structure
    Nested(NestedTemplate),
}

/// Child tag → entry for one nested field, merged across every occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NestedTemplate {
    fields: IndexMap<String, CatalogEntry>,
}

impl NestedTemplate {
    /// Empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add leaf values for a sub-field
    pub fn with_values<I, S>(mut self, tag: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.insert(
            tag.into(),
            CatalogEntry::Values(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Builder: add a structured sub-field
    pub fn with_nested(mut self, tag: impl Into<String>, template: NestedTemplate) -> Self {
        self.fields.insert(tag.into(), CatalogEntry::Nested(template));
        self
    }

    /// Sub-fields in first-seen order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.fields.iter().map(|(tag, entry)| (tag.as_str(), entry))
    }

    /// Entry for one sub-field
    pub fn get(&self, tag: &str) -> Option<&CatalogEntry> {
        self.fields.get(tag)
    }

    /// True if no sub-field was observed
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge the children of `element` into this template.
    ///
    /// A sub-field seen both as structure and as text keeps the structure.
    fn observe(&mut self, element: &Element) {
        for child in &element.children {
            let tag = child.local_name();
            if child.has_children() {
                let entry = self
                    .fields
                    .entry(tag.to_string())
                    .or_insert_with(|| CatalogEntry::Nested(NestedTemplate::new()));
                if matches!(entry, CatalogEntry::Values(_)) {
                    *entry = CatalogEntry::Nested(NestedTemplate::new());
                }
                if let CatalogEntry::Nested(template) = entry {
                    template.observe(child);
                }
            } else if let Some(text) = child.trimmed_text() {
                let entry = self
                    .fields
                    .entry(tag.to_string())
                    .or_insert_with(|| CatalogEntry::Values(Vec::new()));
                if let CatalogEntry::Values(values) = entry {
                    values.push(text.to_string());
                }
            }
        }
    }
}

/// Sampling universe for synthetic records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    fields: IndexMap<String, Vec<String>>,
    nested: IndexMap<String, NestedTemplate>,
    types: Vec<String>,
}

impl Catalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every record of `db`
    pub fn build(db: &DrugBank) -> Self {
        let mut catalog = Catalog::new();
        let drugs = db.drugs();
        for drug in &drugs {
            catalog.observe(drug);
        }
        info!(
            "Catalog built from {} records: {} flat tags, {} nested tags, {} types",
            drugs.len(),
            catalog.fields.len(),
            catalog.nested.len(),
            catalog.types.len()
        );
        catalog
    }

    fn observe(&mut self, drug: &Element) {
        if let Some(kind) = drug.attr(TYPE_ATTRIBUTE) {
            if !self.types.iter().any(|t| t == kind) {
                self.types.push(kind.to_string());
            }
        }

        for field in &drug.children {
            if field.has_children() {
                self.nested
                    .entry(field.local_name().to_string())
                    .or_default()
                    .observe(field);
                for sub in &field.children {
                    self.add_value(sub);
                }
            } else {
                self.add_value(field);
            }
        }
        debug!("Catalog now holds {} flat tags", self.fields.len());
    }

    fn add_value(&mut self, element: &Element) {
        if let Some(text) = element.trimmed_text() {
            self.fields
                .entry(element.local_name().to_string())
                .or_default()
                .push(text.to_string());
        }
    }

    /// Builder: add flat values for a tag
    pub fn with_field<I, S>(mut self, tag: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .entry(tag.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Builder: add a nested template
    pub fn with_nested(mut self, tag: impl Into<String>, template: NestedTemplate) -> Self {
        self.nested.insert(tag.into(), template);
        self
    }

    /// Builder: add an observed type
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        let kind = kind.into();
        if !self.types.contains(&kind) {
            self.types.push(kind);
        }
        self
    }

    /// Flat tag → values, in first-seen tag order
    pub fn fields(&self) -> &IndexMap<String, Vec<String>> {
        &self.fields
    }

    /// Values for one flat tag
    pub fn values(&self, tag: &str) -> Option<&[String]> {
        self.fields.get(tag).map(Vec::as_slice)
    }

    /// Nested tag → template, in first-seen tag order
    pub fn nested(&self) -> &IndexMap<String, NestedTemplate> {
        &self.nested
    }

    /// Distinct record types, in first-seen order
    pub fn types(&self) -> &[String] {
        &self.types
    }
}

impl DrugBank {
    /// Build the field catalog over every record
    pub fn catalog(&self) -> Catalog {
        Catalog::build(self)
    }
}
