//! Fixed namespace binding used to resolve prefixed field paths.

use indexmap::IndexMap;

/// DrugBank namespace URI, the default namespace of every export
pub const DRUGBANK_NS: &str = "http://www.drugbank.ca";

/// XML Schema instance namespace URI (carries `xsi:schemaLocation` on the root)
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Prefix bound to [`DRUGBANK_NS`] in the default binding
pub const DRUGBANK_PREFIX: &str = "db";

/// Prefix bound to [`XSI_NS`] in the default binding
pub const XSI_PREFIX: &str = "xsi";

/// Prefix → namespace URI table.
///
/// The binding is always supplied up front; nothing is discovered from the
/// document being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    bindings: IndexMap<String, String>,
    default_uri: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        let mut bindings = IndexMap::new();
        bindings.insert(DRUGBANK_PREFIX.to_string(), DRUGBANK_NS.to_string());
        bindings.insert(XSI_PREFIX.to_string(), XSI_NS.to_string());
        Self {
            bindings,
            default_uri: DRUGBANK_NS.to_string(),
        }
    }
}

impl Namespaces {
    /// Create an empty binding whose serialized default namespace is `default_uri`
    pub fn empty(default_uri: impl Into<String>) -> Self {
        Self {
            bindings: IndexMap::new(),
            default_uri: default_uri.into(),
        }
    }

    /// Bind `prefix` to `uri`, replacing any previous binding of that prefix
    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.bindings.insert(prefix.into(), uri.into());
        self
    }

    /// Resolve a prefix to its URI
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// First prefix bound to `uri`, if any
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, bound)| bound.as_str() == uri)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Namespace written as the default (`xmlns="..."`) on serialized roots
    pub fn default_uri(&self) -> &str {
        &self.default_uri
    }

    /// Iterate over `(prefix, uri)` pairs in binding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }
}
