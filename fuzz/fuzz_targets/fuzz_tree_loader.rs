#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use drugbank::database::DrugBank;
use drugbank::extract::ExtractionSpec;

fuzz_target!(|data: &[u8]| {
    // Loading must either succeed or fail with an error, never panic
    let Ok(db) = DrugBank::from_reader(Cursor::new(data)) else {
        return;
    };

    // Anything that loads must survive the record-level passes too
    let _ = db.identity_index();
    let _ = db.catalog();
    let _ = db.extract_proteins();
    let _ = db.extract(&ExtractionSpec::new(".//db:*").simple("text", "."));
});
