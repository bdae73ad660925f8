use indexmap::IndexMap;
use log::debug;

use super::table::{Row, Table, Value};
use crate::database::DrugBank;

/// Column holding the identifier in [`IdentityIndex::to_table`]
pub const ID_COLUMN: &str = "id";
/// Column holding the display name in [`IdentityIndex::to_table`]
pub const NAME_COLUMN: &str = "name";

/// Mapping from every identifier of a record to that record's display name.
///
/// Built from all `drugbank-id` elements, primary or not. Records without any
/// identifier or without a name contribute nothing. When two records share an
/// identifier the later one wins, while the entry keeps the position of its
/// first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityIndex {
    entries: IndexMap<String, String>,
}

impl IdentityIndex {
    /// Build the index from every record of `db`
    pub fn build(db: &DrugBank) -> Self {
        let mut index = IdentityIndex::default();
        let mut skipped = 0usize;

        for drug in db.drugs() {
            let ids = db.ids(drug);
            let name = match db.name(drug) {
                Some(name) if !ids.is_empty() => name,
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            for id in ids {
                index.insert(id, name);
            }
        }

        debug!(
            "Identity index: {} ids, {} records skipped",
            index.len(),
            skipped
        );
        index
    }

    /// Build from explicit `(id, name)` pairs, applying the same overwrite rule
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut index = IdentityIndex::default();
        for (id, name) in pairs {
            index.insert(id, name);
        }
        index
    }

    fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.entries.insert(id.into(), name.into());
    }

    /// Display name for an identifier
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no identifiers were indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(id, name)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }

    /// Two-column `id`/`name` table in index order
    pub fn to_table(&self) -> Table {
        let mut table = Table::with_columns([ID_COLUMN, NAME_COLUMN]);
        for (id, name) in self.iter() {
            table.push(Row::from_iter([
                (ID_COLUMN, Value::text(id)),
                (NAME_COLUMN, Value::text(name)),
            ]));
        }
        table
    }
}
