//! Service error types.

use crate::availability::OccupancyError;
use crate::domain::{InvalidSegment, SeatPosition, TrainRunKey};
use crate::fares::FareError;
use crate::route::RouteError;
use crate::storage::StorageError;

/// Error from a reservation service operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReservationError {
    /// A station, run, seat or reservation named by the caller does not exist
    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    /// Reference or schedule data contradicts itself
    #[error("data consistency error: {0}")]
    Consistency(String),

    /// The requested segment is zero-length, inverted, or not served
    #[error("invalid segment: {0}")]
    InvalidSegment(String),

    /// The request is malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Another reservation holds the seat for an overlapping segment
    #[error("{seat} on {run} is already reserved")]
    Conflict { run: TrainRunKey, seat: SeatPosition },

    /// Storage failed
    #[error(transparent)]
    Storage(StorageError),
}

impl ReservationError {
    pub(crate) fn not_found(what: &'static str, key: impl ToString) -> Self {
        ReservationError::NotFound {
            what,
            key: key.to_string(),
        }
    }
}

impl From<StorageError> for ReservationError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::SeatTaken { run, seat } => ReservationError::Conflict { run, seat },
            StorageError::RunNotFound(key) => ReservationError::not_found("train run", key),
            StorageError::ReservationNotFound(id) => ReservationError::not_found("reservation", id),
            StorageError::UnknownStation(name) => {
                ReservationError::Consistency(format!("storage references unknown station {name}"))
            }
            StorageError::InvalidReservation { message } => ReservationError::InvalidRequest(message),
            e @ (StorageError::Timeout(_) | StorageError::Load { .. }) => ReservationError::Storage(e),
        }
    }
}

impl From<RouteError> for ReservationError {
    fn from(e: RouteError) -> Self {
        ReservationError::Consistency(e.to_string())
    }
}

impl From<FareError> for ReservationError {
    fn from(e: FareError) -> Self {
        ReservationError::Consistency(e.to_string())
    }
}

impl From<OccupancyError> for ReservationError {
    fn from(e: OccupancyError) -> Self {
        ReservationError::Consistency(e.to_string())
    }
}

impl From<InvalidSegment> for ReservationError {
    fn from(e: InvalidSegment) -> Self {
        ReservationError::InvalidSegment(e.to_string())
    }
}
