//! Reservation records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{SeatPosition, TrainRunKey};

/// Storage-assigned reservation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of the authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Reserved,
    /// Cancelled reservations no longer occupy their seats.
    Cancelled,
}

/// A booking of one or more seats on one run for one segment.
///
/// Only `status` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub run: TrainRunKey,
    /// Boarding station name.
    pub departure: String,
    /// Alighting station name.
    pub arrival: String,
    pub seats: Vec<SeatPosition>,
    pub status: ReservationStatus,
    pub payment_id: Option<String>,
}

impl Reservation {
    /// Whether this reservation still holds its seats.
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Reserved
    }

    pub fn holds(&self, seat: &SeatPosition) -> bool {
        self.seats.iter().any(|s| s == seat)
    }
}

/// A reservation to be written by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: UserId,
    pub run: TrainRunKey,
    pub departure: String,
    pub arrival: String,
    pub seats: Vec<SeatPosition>,
    pub payment_id: Option<String>,
}
