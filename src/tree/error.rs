/// Errors that can occur while loading or writing an XML tree
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid attribute syntax
    #[error("Invalid attribute: {0}")]
    AttributeError(#[from] quick_xml::events::attributes::AttrError),

    /// UTF-8 encoding error in a name or text node
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// Prefix used in the document without a matching `xmlns` declaration
    #[error("Undeclared namespace prefix: {0}")]
    UnboundPrefix(String),

    /// Document is well-formed at the token level but not as a tree
    #[error("Invalid XML structure: {0}")]
    InvalidStructure(String),
}

/// Errors raised when compiling a field path expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Path expression is empty
    #[error("Empty path expression")]
    Empty,

    /// Path contains an empty step (e.g. `a//` at the end or `/a`)
    #[error("Empty step in path: {0}")]
    EmptyStep(String),

    /// Prefix is not bound in the namespace table
    #[error("Unknown namespace prefix '{prefix}' in path: {path}")]
    UnknownPrefix {
        /// Offending prefix
        prefix: String,
        /// Full path expression
        path: String,
    },

    /// Predicate could not be parsed
    #[error("Invalid predicate '{0}'")]
    InvalidPredicate(String),

    /// Step syntax not understood
    #[error("Invalid path step '{0}'")]
    InvalidStep(String),
}
