//! Error types for the catalogue crate.

use thiserror::Error;

/// Errors that can occur while loading or constructing catalogue data.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// A place record had an empty identifier. Identity is the id, so this is
    /// rejected at construction rather than surfacing later in the engine.
    #[error("Place record is missing an identifier")]
    MissingId,

    /// I/O error occurred while reading a catalogue file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalogue file was not valid JSON
    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogueError>;
