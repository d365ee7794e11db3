//! Station directory error types.

use crate::domain::StationId;

/// Errors from station lookups and directory construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StationError {
    /// No station with this name
    #[error("station not found: {0}")]
    UnknownName(String),

    /// No station with this id
    #[error("station not found: id {0}")]
    UnknownId(StationId),

    /// Reference data violates a directory invariant
    #[error("invalid station data: {message}")]
    InvalidData { message: String },
}
