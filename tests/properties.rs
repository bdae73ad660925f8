//! Property tests over generated DrugBank documents

use std::collections::{HashMap, HashSet};

use drugbank::mock::sample_records;
use drugbank::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// (identifiers, optional name, optional description) for one record
type RecordSpec = (Vec<String>, Option<String>, Option<String>);

fn record_strategy() -> impl Strategy<Value = RecordSpec> {
    (
        prop::collection::vec("[A-Z]{2}[0-9]{3}", 0..4),
        prop::option::of("[A-Za-z]{1,8}"),
        prop::option::of("[a-z ]{0,12}"),
    )
}

fn render(records: &[RecordSpec]) -> String {
    let mut xml = String::from(r#"<drugbank xmlns="http://www.drugbank.ca">"#);
    for (i, (ids, name, description)) in records.iter().enumerate() {
        let kind = if i % 2 == 0 { "biotech" } else { "small molecule" };
        xml.push_str(&format!(r#"<drug type="{kind}">"#));
        for (j, id) in ids.iter().enumerate() {
            if j == 0 {
                xml.push_str(&format!(r#"<drugbank-id primary="true">{id}</drugbank-id>"#));
            } else {
                xml.push_str(&format!("<drugbank-id>{id}</drugbank-id>"));
            }
        }
        if let Some(name) = name {
            xml.push_str(&format!("<name>{name}</name>"));
        }
        if let Some(description) = description {
            xml.push_str(&format!("<description>{description}</description>"));
        }
        xml.push_str("<synonyms><synonym>S</synonym></synonyms>");
        xml.push_str("</drug>");
    }
    xml.push_str("</drugbank>");
    xml
}

proptest! {
    /// Without collisions there is one entry per identifier of every named record
    #[test]
    fn test_identity_index_entry_count(records in prop::collection::vec(record_strategy(), 0..12)) {
        let db = DrugBank::from_xml(&render(&records)).unwrap();
        let index = db.identity_index();

        // Expected mapping under last-write-wins
        let mut expected: HashMap<&str, &str> = HashMap::new();
        let mut total = 0usize;
        for (ids, name, _) in &records {
            let Some(name) = name else { continue };
            for id in ids {
                expected.insert(id, name);
                total += 1;
            }
        }

        prop_assert_eq!(index.len(), expected.len());
        let distinct: HashSet<&str> = records
            .iter()
            .filter(|(_, name, _)| name.is_some())
            .flat_map(|(ids, _, _)| ids.iter().map(String::as_str))
            .collect();
        if distinct.len() == total {
            prop_assert_eq!(index.len(), total);
        }
        for (id, name) in expected {
            prop_assert_eq!(index.name_of(id), Some(name));
        }
    }

    /// Every extraction row belongs to a record with a primary id and a name
    #[test]
    fn test_extraction_rows_are_valid(records in prop::collection::vec(record_strategy(), 0..12)) {
        let db = DrugBank::from_xml(&render(&records)).unwrap();
        let table = db.extract(&ExtractionSpec::new(".")).unwrap();

        let valid = records
            .iter()
            .filter(|(ids, name, _)| !ids.is_empty() && name.is_some())
            .count();
        prop_assert_eq!(table.len(), valid);
        for row in table.rows() {
            prop_assert!(row.get("drugbank-id").as_text().is_some());
            prop_assert!(row.get("name").as_text().is_some());
        }
    }

    /// Building the catalog twice from the same document gives the same result
    #[test]
    fn test_catalog_idempotent(records in prop::collection::vec(record_strategy(), 0..12)) {
        let db = DrugBank::from_xml(&render(&records)).unwrap();
        prop_assert_eq!(db.catalog(), db.catalog());
    }

    /// Sampling never duplicates and caps at the available records
    #[test]
    fn test_real_sample_capped(
        records in prop::collection::vec(record_strategy(), 0..12),
        requested in 0usize..20,
        seed in any::<u64>(),
    ) {
        let db = DrugBank::from_xml(&render(&records)).unwrap();
        let drugs = db.drugs();
        let picked = sample_records(&drugs, requested, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(picked.len(), requested.min(drugs.len()));
        let unique: HashSet<*const Element> = picked.iter().map(|d| *d as *const Element).collect();
        prop_assert_eq!(unique.len(), picked.len());
    }

    /// Synthetic identifiers are MOCK00001.. in order
    #[test]
    fn test_synthetic_ids_sequential(count in 0usize..40, seed in any::<u64>()) {
        let catalog = Catalog::new().with_field("name", ["A", "B"]);
        let records = Synthesizer::new(&catalog).synthesize(count, &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(records.len(), count);
        for (i, drug) in records.iter().enumerate() {
            let id = drug.children[0].text.as_deref().unwrap_or_default();
            prop_assert_eq!(id, format!("MOCK{:05}", i + 1));
        }
    }
}
