//! Human-readable summary of a loaded document

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::database::DrugBank;

/// Counts describing a DrugBank document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSummary {
    /// Where the document came from
    pub source: String,
    /// `version` attribute of the root, if any
    pub version: Option<String>,
    /// `exported-on` attribute of the root, if any
    pub exported_on: Option<String>,
    /// Drug records
    pub records: usize,
    /// Records with a primary identifier and a name (extraction candidates)
    pub valid_records: usize,
    /// Distinct identifiers in the identity index
    pub identifiers: usize,
    /// Observed drug types
    pub types: Vec<String>,
    /// Tags in the flat catalog
    pub flat_tags: usize,
    /// Tags in the nested catalog
    pub nested_tags: usize,
}

impl DatabaseSummary {
    /// Summarize `db`
    pub fn new(db: &DrugBank, source: impl Into<String>) -> Self {
        let drugs = db.drugs();
        let valid_records = drugs
            .iter()
            .filter(|d| db.primary_id(d).is_some() && db.name(d).is_some())
            .count();
        let catalog = db.catalog();

        Self {
            source: source.into(),
            version: db.root().attr("version").map(str::to_string),
            exported_on: db.root().attr("exported-on").map(str::to_string),
            records: drugs.len(),
            valid_records,
            identifiers: db.identity_index().len(),
            types: catalog.types().to_vec(),
            flat_tags: catalog.fields().len(),
            nested_tags: catalog.nested().len(),
        }
    }

    /// Records skipped by extraction
    pub fn skipped_records(&self) -> usize {
        self.records - self.valid_records
    }

    /// Format the summary with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("DrugBank Summary").bold().cyan()));
            output.push_str(&format!("{}\n", style("================").cyan()));
            output.push_str(&format!("{}: {}\n", style("File").bold(), self.source));
            if let Some(version) = &self.version {
                output.push_str(&format!("{}: {}\n", style("Version").bold(), version));
            }
            if let Some(exported) = &self.exported_on {
                output.push_str(&format!("{}: {}\n", style("Exported").bold(), exported));
            }
            output.push('\n');

            output.push_str(&format!(
                "Records: {} ({} usable, {} skipped)\n",
                style(self.records).green(),
                style(self.valid_records).green(),
                style(self.skipped_records()).yellow()
            ));
            output.push_str(&format!(
                "Identifiers: {}\n",
                style(self.identifiers).green()
            ));
            output.push_str(&format!(
                "Types: {}\n",
                style(self.types.join(", ")).magenta()
            ));
            output.push_str(&format!(
                "Catalog: {} flat tags, {} nested tags\n",
                style(self.flat_tags).green(),
                style(self.nested_tags).green()
            ));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for DatabaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DrugBank Summary")?;
        writeln!(f, "================")?;
        writeln!(f, "File: {}", self.source)?;
        if let Some(version) = &self.version {
            writeln!(f, "Version: {}", version)?;
        }
        if let Some(exported) = &self.exported_on {
            writeln!(f, "Exported: {}", exported)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Records: {} ({} usable, {} skipped)",
            self.records,
            self.valid_records,
            self.skipped_records()
        )?;
        writeln!(f, "Identifiers: {}", self.identifiers)?;
        writeln!(f, "Types: {}", self.types.join(", "))?;
        writeln!(
            f,
            "Catalog: {} flat tags, {} nested tags",
            self.flat_tags, self.nested_tags
        )
    }
}
