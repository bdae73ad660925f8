use super::*;
use crate::fixtures::{PATHWAYS, TWO_DRUGS};

const EXTERNAL_ID_PATH: &str =
    "db:polypeptide/db:external-identifiers/db:external-identifier/db:identifier";

#[test]
fn test_extract_targets() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let spec = ExtractionSpec::new("db:targets/db:target")
        .simple("target-name", "db:name")
        .nested("external-ids", EXTERNAL_ID_PATH);

    let table = db.extract(&spec).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.columns(),
        &["name", "drugbank-id", "target-name", "external-ids"]
    );
    let row = &table.rows()[0];
    assert_eq!(row.get("name"), &Value::text("Lepirudin"));
    assert_eq!(row.get("drugbank-id"), &Value::text("DB00001"));
    assert_eq!(row.get("target-name"), &Value::text("Thrombin"));
    assert_eq!(row.get("external-ids"), &Value::list([Some("F2-Gene")]));
}

#[test]
fn test_extract_without_name_and_id() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let spec = ExtractionSpec::new("db:targets/db:target")
        .nested("external-ids", EXTERNAL_ID_PATH)
        .name_column(None)
        .id_column(None);

    let table = db.extract(&spec).unwrap();
    assert_eq!(table.columns(), &["external-ids"]);
    assert_eq!(table.rows()[0].columns().count(), 1);
}

#[test]
fn test_extract_missing_fields_are_null_or_empty() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let spec = ExtractionSpec::new(".")
        .simple("description", "db:description")
        .nested("synonyms", "db:synonyms/db:synonym");

    let table = db.extract(&spec).unwrap();

    // One row per record, since "." anchors on the record itself
    assert_eq!(table.len(), 2);
    for row in table.rows() {
        assert_eq!(row.get("description"), &Value::Null);
        assert_eq!(row.get("synonyms"), &Value::List(vec![]));
    }
}

#[test]
fn test_extract_skips_records_without_primary_id_or_name() {
    let db = DrugBank::from_xml(PATHWAYS).unwrap();
    let table = db
        .extract(&ExtractionSpec::new(".").simple("description", "db:description"))
        .unwrap();

    let ids: Vec<_> = table
        .column("drugbank-id")
        .filter_map(Value::as_text)
        .collect();
    assert_eq!(ids, vec!["DB00010", "DB00011"]);
}

#[test]
fn test_extract_one_row_per_anchor_in_document_order() {
    let db = DrugBank::from_xml(PATHWAYS).unwrap();
    let spec = ExtractionSpec::new("db:synonyms/db:synonym").simple("synonym", ".");

    let table = db.extract(&spec).unwrap();
    let synonyms: Vec<_> = table.column("synonym").filter_map(Value::as_text).collect();
    assert_eq!(synonyms, vec!["Alpha", "Alphum", "Beta"]);
}

#[test]
fn test_extract_nested_keeps_duplicates_and_nulls() {
    let db = DrugBank::from_xml(
        r#"<drugbank xmlns="http://www.drugbank.ca">
             <drug>
               <drugbank-id primary="true">DB1</drugbank-id>
               <name>One</name>
               <tags><tag>a</tag><tag/><tag>a</tag></tags>
             </drug>
           </drugbank>"#,
    )
    .unwrap();
    let table = db
        .extract(&ExtractionSpec::new(".").nested("tags", "db:tags/db:tag"))
        .unwrap();

    assert_eq!(
        table.rows()[0].get("tags"),
        &Value::list([Some("a"), None, Some("a")])
    );
}

#[test]
fn test_extract_invalid_path() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let spec = ExtractionSpec::new("db:targets").simple("bad", "nope:name");
    assert!(matches!(
        db.extract(&spec),
        Err(PathError::UnknownPrefix { .. })
    ));
}

#[test]
fn test_identity_index() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let index = db.identity_index();

    let pairs: Vec<_> = index.iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("DB00001", "Lepirudin"),
            ("BTD00024", "Lepirudin"),
            ("DB00002", "SmallMolecule"),
        ]
    );

    let table = index.to_table();
    assert_eq!(table.columns(), &["id", "name"]);
    assert_eq!(table.len(), 3);
}

#[test]
fn test_identity_index_uses_non_primary_ids_and_skips_nameless() {
    let db = DrugBank::from_xml(PATHWAYS).unwrap();
    let index = db.identity_index();

    assert_eq!(index.name_of("APRD00001"), Some("Alphadrug"));
    assert_eq!(index.name_of("DB00012"), Some("Gammadrug"));
    assert_eq!(index.name_of("DB00013"), None);
    assert_eq!(index.len(), 4);
}

#[test]
fn test_identity_index_last_write_wins() {
    let index = IdentityIndex::from_pairs([("X1", "First"), ("X2", "Other"), ("X1", "Second")]);

    assert_eq!(index.name_of("X1"), Some("Second"));
    // Overwritten entries keep their original position
    let ids: Vec<_> = index.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["X1", "X2"]);
}

#[test]
fn test_extract_proteins() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let table = db.extract_proteins().unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.columns(), &PROTEIN_COLUMNS);
    let row = &table.rows()[0];
    let expected = [
        ("drug-name", "Lepirudin"),
        ("target-id", "T001"),
        ("source", "Swiss-Prot"),
        ("polypeptide-id", "P00734"),
        ("polypeptide-name", "Hirudin"),
        ("gene-name", "F2"),
        ("genatlas-id", "F2-Gene"),
        ("locus", "11p15.5"),
        ("chromosome", "11"),
        ("location", "extracellular"),
    ];
    for (column, value) in expected {
        assert_eq!(row.get(column), &Value::text(value), "column {column}");
    }
}

#[test]
fn test_extract_proteins_edge_cases() {
    let db = DrugBank::from_xml(
        r#"<drugbank xmlns="http://www.drugbank.ca">
             <drug>
               <drugbank-id primary="true">DB1</drugbank-id>
               <name>One</name>
               <targets>
                 <target><id>T1</id></target>
                 <target>
                   <id>T2</id>
                   <polypeptide id="P1" source="TrEMBL">
                     <locus>Xp22.32 and Yp11.3</locus>
                   </polypeptide>
                 </target>
               </targets>
             </drug>
           </drugbank>"#,
    )
    .unwrap();
    let table = db.extract_proteins().unwrap();

    // Target without polypeptide is skipped
    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];
    assert_eq!(row.get("target-id"), &Value::text("T2"));
    assert_eq!(row.get("chromosome"), &Value::Null);
    assert_eq!(row.get("genatlas-id"), &Value::Null);
    assert_eq!(row.get("gene-name"), &Value::Null);
}

#[test]
fn test_table_explode() {
    let table: Table = [
        Row::from_iter([
            ("pathway", Value::text("A")),
            ("drugs", Value::list([Some("x"), Some("y")])),
        ]),
        Row::from_iter([("pathway", Value::text("B")), ("drugs", Value::List(vec![]))]),
    ]
    .into_iter()
    .collect();

    let exploded = table.explode("drugs");
    let pairs: Vec<_> = exploded
        .rows()
        .iter()
        .map(|r| (r.get("pathway").clone(), r.get("drugs").clone()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (Value::text("A"), Value::text("x")),
            (Value::text("A"), Value::text("y")),
            (Value::text("B"), Value::Null),
        ]
    );
}

#[test]
fn test_table_ragged_rows() {
    let mut table = Table::new();
    table.push(Row::from_iter([("a", Value::text("1"))]));
    table.push(Row::from_iter([("b", Value::text("2"))]));

    assert_eq!(table.columns(), &["a", "b"]);
    assert_eq!(table.rows()[0].get("b"), &Value::Null);
}

#[test]
fn test_table_csv_and_json() {
    let db = DrugBank::from_xml(TWO_DRUGS).unwrap();
    let table = db
        .extract(
            &ExtractionSpec::new("db:targets/db:target")
                .simple("missing", "db:nothing")
                .nested("external-ids", EXTERNAL_ID_PATH),
        )
        .unwrap();

    let mut csv_out = Vec::new();
    table.write_csv(&mut csv_out).unwrap();
    let csv_text = String::from_utf8(csv_out).unwrap();
    assert_eq!(
        csv_text,
        "name,drugbank-id,missing,external-ids\nLepirudin,DB00001,,F2-Gene\n"
    );

    let json = table.to_json();
    assert_eq!(
        json,
        serde_json::json!([{
            "name": "Lepirudin",
            "drugbank-id": "DB00001",
            "missing": null,
            "external-ids": ["F2-Gene"]
        }])
    );
}
