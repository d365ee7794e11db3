//! Fare error types.

use chrono::NaiveDate;

use crate::domain::{SeatClass, TrainClass};
use crate::stations::StationError;

/// Errors from fare lookups.
///
/// Every variant points at a gap in reference data rather than at bad user
/// input, since the stations have already been validated by the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareError {
    /// No band covers the distance
    #[error("no distance fare band covers {distance}")]
    NoDistanceBand { distance: f64 },

    /// No rule is in force for the class pair on the date
    #[error("no fare rule for {train_class}/{seat_class} on {date}")]
    NoFareRule {
        train_class: TrainClass,
        seat_class: SeatClass,
        date: NaiveDate,
    },

    /// Station lookup failed
    #[error(transparent)]
    Station(#[from] StationError),

    /// Reference data violates a fare table invariant
    #[error("invalid fare data: {message}")]
    InvalidData { message: String },
}
