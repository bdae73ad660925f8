use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::database::DrugBank;
use crate::fixtures::TWO_DRUGS;
use crate::tree::DRUGBANK_NS;

fn child_texts<'a>(drug: &'a Element, tag: &str) -> Vec<&'a str> {
    drug.children
        .iter()
        .filter(|c| c.local_name() == tag)
        .filter_map(|c| c.text.as_deref())
        .collect()
}

#[test]
fn test_mock_id_padding() {
    assert_eq!(mock_id(1), "MOCK00001");
    assert_eq!(mock_id(42), "MOCK00042");
    assert_eq!(mock_id(123456), "MOCK123456");
}

#[test]
fn test_synthesize_names_only() {
    let catalog = Catalog::new().with_field("name", ["A", "B"]);
    let mut rng = StdRng::seed_from_u64(7);

    let records = Synthesizer::new(&catalog).synthesize(5, &mut rng);

    assert_eq!(records.len(), 5);
    for (i, drug) in records.iter().enumerate() {
        assert_eq!(drug.name, QName::drugbank("drug"));
        assert_eq!(child_texts(drug, "drugbank-id"), vec![mock_id(i + 1)]);
        let names = child_texts(drug, "name");
        assert_eq!(names.len(), 1);
        assert!(["A", "B"].contains(&names[0]));
        // Only the identifier and the name
        assert_eq!(drug.children.len(), 2);
    }
}

#[test]
fn test_synthesize_attributes() {
    let catalog = Catalog::new();
    let date = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let drug = Synthesizer::new(&catalog).with_date(date).record(3, &mut rng);

    assert!(FALLBACK_TYPES.contains(&drug.attr("type").unwrap()));
    assert_eq!(drug.attr("created"), Some("2030-06-15"));
    assert_eq!(drug.attr("updated"), Some("2030-06-15"));
    let id = &drug.children[0];
    assert_eq!(id.attr("primary"), Some("true"));
    assert_eq!(id.text.as_deref(), Some("MOCK00003"));
    assert_eq!(id.name.namespace.as_deref(), Some(DRUGBANK_NS));
}

#[test]
fn test_synthesize_default_date() {
    let catalog = Catalog::new();
    let drug = Synthesizer::new(&catalog).record(1, &mut StdRng::seed_from_u64(0));
    assert_eq!(drug.attr("created"), Some("2025-01-01"));
}

#[test]
fn test_synthesize_uses_observed_types() {
    let catalog = Catalog::new().with_type("nutraceutical");
    let mut rng = StdRng::seed_from_u64(3);

    for drug in Synthesizer::new(&catalog).synthesize(10, &mut rng) {
        assert_eq!(drug.attr("type"), Some("nutraceutical"));
    }
}

#[test]
fn test_synthesize_skips_empty_fields_and_reserved_ids() {
    let catalog = Catalog::new()
        .with_field("drugbank-id", ["DB00001"])
        .with_field("description", Vec::<String>::new())
        .with_field("name", ["Only"]);
    let drug = Synthesizer::new(&catalog).record(1, &mut StdRng::seed_from_u64(0));

    assert_eq!(child_texts(&drug, "drugbank-id"), vec!["MOCK00001"]);
    assert!(child_texts(&drug, "description").is_empty());
    assert_eq!(child_texts(&drug, "name"), vec!["Only"]);
}

#[test]
fn test_synthesize_nested_reconstruction() {
    let template = NestedTemplate::new().with_nested(
        "target",
        NestedTemplate::new()
            .with_values("id", ["T1", "T2"])
            .with_values("empty", Vec::<String>::new())
            .with_nested("polypeptide", NestedTemplate::new().with_values("locus", ["1p"])),
    );
    let catalog = Catalog::new()
        .with_nested("targets", template)
        .with_nested("hollow", NestedTemplate::new());
    let drug = Synthesizer::new(&catalog).record(1, &mut StdRng::seed_from_u64(9));

    let targets = drug
        .children
        .iter()
        .find(|c| c.local_name() == "targets")
        .unwrap();
    let target = &targets.children[0];
    assert_eq!(target.local_name(), "target");
    let tags: Vec<_> = target.children.iter().map(Element::local_name).collect();
    assert_eq!(tags, vec!["id", "polypeptide"]);
    assert_eq!(target.children[1].children[0].text.as_deref(), Some("1p"));

    // Templates with nothing to draw are omitted
    assert!(drug.children.iter().all(|c| c.local_name() != "hollow"));
}

#[test]
fn test_synthesize_flat_mode() {
    let catalog = Catalog::new()
        .with_field("name", ["A"])
        .with_nested("synonyms", NestedTemplate::new().with_values("synonym", ["S"]));
    let drug = Synthesizer::new(&catalog)
        .with_nested(false)
        .record(1, &mut StdRng::seed_from_u64(0));

    assert_eq!(drug.children.len(), 2);
    assert!(child_texts(&drug, "synonyms").is_empty());
}

#[test]
fn test_synthesize_from_real_catalog_is_reproducible() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let catalog = db.catalog();
    let synth = Synthesizer::new(&catalog);

    let first = synth.synthesize(4, &mut StdRng::seed_from_u64(99));
    let second = synth.synthesize(4, &mut StdRng::seed_from_u64(99));
    assert_eq!(first, second);

    for drug in &first {
        let names = child_texts(drug, "name");
        assert_eq!(names.len(), 1);
        assert!(["Lepirudin", "SmallMolecule"].contains(&names[0]));
        assert!(drug.children.iter().any(|c| c.local_name() == "targets"));
    }
}
