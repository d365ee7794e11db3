//! Storage error types.

use std::time::Duration;

use crate::domain::{ReservationId, SeatPosition, TrainRunKey};

/// Errors from the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The call did not complete within the caller's deadline
    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),

    /// No run with this key
    #[error("train run not found: {0}")]
    RunNotFound(TrainRunKey),

    /// No reservation with this id visible to the caller
    #[error("reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    /// A committed reservation already holds the seat for an overlapping segment
    #[error("{seat} on {run} is already reserved for an overlapping segment")]
    SeatTaken { run: TrainRunKey, seat: SeatPosition },

    /// A record names a station that is not in the station table
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// A write was rejected before touching any table
    #[error("invalid reservation: {message}")]
    InvalidReservation { message: String },

    /// Reference data could not be read
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn error_display() {
        let run = TrainRunKey {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            train_class: crate::domain::TrainClass::Express,
            train_name: "5".to_string(),
        };
        let seat = SeatPosition {
            car_number: 3,
            seat_row: 2,
            seat_column: "C".to_string(),
        };

        let err = StorageError::SeatTaken {
            run: run.clone(),
            seat,
        };
        assert_eq!(
            err.to_string(),
            "car 3 seat 2C on 2020-01-01 express 5 is already reserved for an overlapping segment"
        );

        let err = StorageError::RunNotFound(run);
        assert_eq!(err.to_string(), "train run not found: 2020-01-01 express 5");

        let err = StorageError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "storage call timed out after 250ms");
    }
}
