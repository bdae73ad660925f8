use super::*;
use crate::fixtures::{PATHWAYS, TWO_DRUGS};

#[test]
fn test_catalog_flat_fields_and_types() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let catalog = db.catalog();

    assert_eq!(
        catalog.values("drugbank-id").unwrap(),
        &["DB00001", "BTD00024", "DB00002"]
    );
    assert_eq!(catalog.values("name").unwrap(), &["Lepirudin", "SmallMolecule"]);
    assert_eq!(catalog.types(), &["biotech", "small molecule"]);
}

#[test]
fn test_catalog_routes_containers_to_nested() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let catalog = db.catalog();

    assert!(catalog.nested().contains_key("targets"));
    assert!(catalog.values("targets").is_none());

    let targets = &catalog.nested()["targets"];
    let Some(CatalogEntry::Nested(target)) = targets.get("target") else {
        panic!("target should be structural");
    };
    assert_eq!(
        target.get("id"),
        Some(&CatalogEntry::Values(vec!["T001".to_string()]))
    );
    let Some(CatalogEntry::Nested(polypeptide)) = target.get("polypeptide") else {
        panic!("polypeptide should be structural");
    };
    assert_eq!(
        polypeptide.get("locus"),
        Some(&CatalogEntry::Values(vec!["11p15.5".to_string()]))
    );
}

#[test]
fn test_catalog_mixes_first_and_second_level_tags() {
    let db = DrugBank::from_xml(PATHWAYS).unwrap();
    let catalog = db.catalog();

    // Grandchild synonyms land in the flat map under their own tag
    assert_eq!(
        catalog.values("synonym").unwrap(),
        &["Alpha", "Alphum", "Beta"]
    );
    // pathway has no text of its own, so only its container is nested
    assert!(catalog.values("pathway").is_none());
    assert!(catalog.nested().contains_key("pathways"));
    assert_eq!(
        catalog.values("name").unwrap(),
        &["Alphadrug", "Betadrug", "Gammadrug"]
    );
}

#[test]
fn test_catalog_nested_template_merges_occurrences() {
    let db = DrugBank::from_xml(PATHWAYS).unwrap();
    let catalog = db.catalog();

    let synonyms = &catalog.nested()["synonyms"];
    assert_eq!(
        synonyms.get("synonym"),
        Some(&CatalogEntry::Values(vec![
            "Alpha".to_string(),
            "Alphum".to_string(),
            "Beta".to_string()
        ]))
    );
}

#[test]
fn test_catalog_structure_wins_over_text() {
    let db = DrugBank::from_xml(
        r#"<drugbank xmlns="http://www.drugbank.ca">
             <drug>
               <packagers><packager>Plain</packager></packagers>
             </drug>
             <drug>
               <packagers><packager><name>Acme</name></packager></packagers>
             </drug>
           </drugbank>"#,
    )
    .unwrap();
    let catalog = db.catalog();

    let packagers = &catalog.nested()["packagers"];
    assert_eq!(
        packagers.get("packager"),
        Some(&CatalogEntry::Nested(
            NestedTemplate::new().with_values("name", ["Acme"])
        ))
    );
    assert!(catalog.types().is_empty());
}

#[test]
fn test_catalog_skips_empty_text() {
    let db = DrugBank::from_xml(
        r#"<drugbank xmlns="http://www.drugbank.ca">
             <drug type="biotech">
               <description>   </description>
               <indication/>
               <name>Kept</name>
             </drug>
           </drugbank>"#,
    )
    .unwrap();
    let catalog = db.catalog();

    assert!(catalog.values("description").is_none());
    assert!(catalog.values("indication").is_none());
    assert_eq!(catalog.fields().len(), 1);
}

#[test]
fn test_catalog_builders() {
    let catalog = Catalog::new()
        .with_field("name", ["A"])
        .with_field("name", ["B"])
        .with_type("biotech")
        .with_type("biotech");

    assert_eq!(catalog.values("name").unwrap(), &["A", "B"]);
    assert_eq!(catalog.types(), &["biotech"]);
}
