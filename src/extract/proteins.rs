use regex::Regex;

use super::table::{Row, Table, Value};
use super::ExtractError;
use crate::database::DrugBank;
use crate::tree::{Element, FieldPath};

/// External identifier resource whose identifier is reported as `genatlas-id`
pub const GENATLAS_RESOURCE: &str = "GenAtlas";

/// Output columns of [`DrugBank::extract_proteins`], in order
pub const PROTEIN_COLUMNS: [&str; 10] = [
    "drug-name",
    "target-id",
    "source",
    "polypeptide-id",
    "polypeptide-name",
    "gene-name",
    "genatlas-id",
    "locus",
    "chromosome",
    "location",
];

/// Leading chromosome number of a locus such as `11p15.5` or `Xp22.32 and Yp11.3`
pub const CHROMOSOME_PATTERN: &str = r"^(\d+)";

struct ProteinPaths {
    targets: FieldPath,
    id: FieldPath,
    polypeptide: FieldPath,
    name: FieldPath,
    gene_name: FieldPath,
    external_ids: FieldPath,
    resource: FieldPath,
    identifier: FieldPath,
    locus: FieldPath,
    location: FieldPath,
    chromosome: Regex,
}

impl ProteinPaths {
    fn compile(db: &DrugBank) -> Result<Self, ExtractError> {
        Ok(Self {
            targets: db.path("db:targets/db:target")?,
            id: db.path("db:id")?,
            polypeptide: db.path("db:polypeptide")?,
            name: db.path("db:name")?,
            gene_name: db.path("db:gene-name")?,
            external_ids: db.path("db:external-identifiers/db:external-identifier")?,
            resource: db.path("db:resource")?,
            identifier: db.path("db:identifier")?,
            locus: db.path("db:locus")?,
            location: db.path("db:cellular-location")?,
            chromosome: Regex::new(CHROMOSOME_PATTERN)?,
        })
    }

    /// Chromosome number at the start of a locus, if it starts with digits
    fn chromosome_of<'a>(&self, locus: &'a str) -> Option<&'a str> {
        self.chromosome
            .captures(locus)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn genatlas_id<'a>(&self, polypeptide: &'a Element) -> Option<&'a str> {
        let mut found = None;
        for ext in self.external_ids.select(polypeptide) {
            if self.resource.first_text(ext) == Some(GENATLAS_RESOURCE) {
                found = self.identifier.first_text(ext);
            }
        }
        found
    }
}

impl DrugBank {
    /// One row per drug target that carries a polypeptide.
    ///
    /// Records without a primary id or name are skipped, as are targets
    /// without a `polypeptide` child. See [`PROTEIN_COLUMNS`] for the layout.
    pub fn extract_proteins(&self) -> Result<Table, ExtractError> {
        let paths = ProteinPaths::compile(self)?;
        let mut table = Table::with_columns(PROTEIN_COLUMNS);

        for drug in self.drugs() {
            let (Some(_), Some(drug_name)) = (self.primary_id(drug), self.name(drug)) else {
                continue;
            };

            for target in paths.targets.select(drug) {
                let Some(polypeptide) = paths.polypeptide.first(target) else {
                    continue;
                };
                let locus = paths.locus.first_text(polypeptide);

                let row: Row = [
                    ("drug-name", Value::text(drug_name)),
                    ("target-id", Value::from_option(paths.id.first_text(target))),
                    ("source", Value::from_option(polypeptide.attr("source"))),
                    ("polypeptide-id", Value::from_option(polypeptide.attr("id"))),
                    (
                        "polypeptide-name",
                        Value::from_option(paths.name.first_text(polypeptide)),
                    ),
                    (
                        "gene-name",
                        Value::from_option(paths.gene_name.first_text(polypeptide)),
                    ),
                    ("genatlas-id", Value::from_option(paths.genatlas_id(polypeptide))),
                    ("locus", Value::from_option(locus)),
                    ("chromosome", Value::from_option(locus.and_then(|l| paths.chromosome_of(l)))),
                    (
                        "location",
                        Value::from_option(paths.location.first_text(polypeptide)),
                    ),
                ]
                .into_iter()
                .collect();
                table.push(row);
            }
        }

        Ok(table)
    }
}
