use thiserror::Error;

use crate::engine::AttributeKey;

/// Caller contract violations reported by the catalog.
///
/// Misses are never errors: a search that finds nothing returns an empty list.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    /// Attribute selector that names no known field
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Search or sort selector that names no known algorithm
    #[error("Invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    /// Known attribute that no song in this catalog carries
    #[error("Attribute '{0}' is not present in this catalog")]
    UnsupportedAttribute(AttributeKey),

    #[error("Playlist '{0}' not found")]
    PlaylistNotFound(String),

    #[error("Song '{0}' not found")]
    SongNotFound(String),

    /// Two songs handed to the catalog share an id
    #[error("Duplicate song id: {0}")]
    DuplicateId(u32),

    #[error("No song ids left to assign")]
    IdsExhausted,
}
