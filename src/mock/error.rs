use crate::database::DatabaseError;
use crate::tree::TreeError;

/// Errors that can occur while generating a mock database
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    /// The source document could not be opened
    #[error("Failed to load source database: {0}")]
    SourceError(#[from] DatabaseError),

    /// The mock document could not be serialized or written
    #[error("Failed to write mock database: {0}")]
    WriteError(#[from] TreeError),
}
