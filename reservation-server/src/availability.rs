//! Seat availability for a requested segment.
//!
//! Reservations on a run are first resolved from station names to
//! [`Segment`]s, then every seat of a bucket is checked against them with
//! the overlap engine. The free-seat count is reported as a tier rather
//! than a number.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidSegment, Reservation, ReservationId, Seat, SeatBucket, SeatPosition, Segment, TrainRun};
use crate::route::is_occupied;
use crate::stations::{StationDirectory, StationError};

/// Free seats at or above this count are reported as [`Availability::Full`].
pub const PLENTY_THRESHOLD: usize = 10;

/// Availability tier of a seat bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// Plenty of free seats.
    #[serde(rename = "○")]
    Full,
    /// A few free seats left.
    #[serde(rename = "△")]
    Limited,
    /// No free seats.
    #[serde(rename = "×")]
    SoldOut,
}

impl Availability {
    /// Tier for a number of free seats.
    pub fn from_free_seats(free: usize) -> Self {
        match free {
            0 => Availability::SoldOut,
            n if n < PLENTY_THRESHOLD => Availability::Limited,
            _ => Availability::Full,
        }
    }
}

/// A stored reservation that cannot be placed on its run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OccupancyError {
    #[error("reservation {reservation} names an unknown station: {source}")]
    UnknownStation {
        reservation: ReservationId,
        source: StationError,
    },

    #[error("reservation {reservation} has an invalid segment: {source}")]
    InvalidSegment {
        reservation: ReservationId,
        source: InvalidSegment,
    },
}

/// Reserved segments of one run, indexed by seat.
#[derive(Debug, Clone, Default)]
pub struct OccupancyMap {
    by_seat: HashMap<SeatPosition, Vec<Segment>>,
}

impl OccupancyMap {
    /// Resolve the active reservations of a run.
    ///
    /// Cancelled reservations are skipped. A reservation whose stations are
    /// unknown, or whose segment does not fit the run's direction, is a data
    /// consistency error.
    pub fn build<'a>(
        directory: &StationDirectory,
        run: &TrainRun,
        reservations: impl IntoIterator<Item = &'a Reservation>,
    ) -> Result<Self, OccupancyError> {
        let mut by_seat: HashMap<SeatPosition, Vec<Segment>> = HashMap::new();

        for reservation in reservations.into_iter().filter(|r| r.is_active()) {
            let segment = reservation_segment(directory, run, reservation)?;
            for seat in &reservation.seats {
                by_seat.entry(seat.clone()).or_default().push(segment);
            }
        }

        Ok(Self { by_seat })
    }

    /// Whether the seat is taken for any part of the requested segment.
    pub fn is_occupied(&self, seat: &SeatPosition, requested: &Segment) -> bool {
        self.by_seat
            .get(seat)
            .is_some_and(|reserved| is_occupied(requested, reserved))
    }
}

/// Resolve a reservation's station names to a segment on the run.
pub fn reservation_segment(
    directory: &StationDirectory,
    run: &TrainRun,
    reservation: &Reservation,
) -> Result<Segment, OccupancyError> {
    let lookup = |name: &str| {
        directory
            .station_by_name(name)
            .map(|s| s.id)
            .map_err(|source| OccupancyError::UnknownStation {
                reservation: reservation.reservation_id,
                source,
            })
    };

    let from = lookup(&reservation.departure)?;
    let to = lookup(&reservation.arrival)?;

    Segment::new(from, to, run.direction).map_err(|source| OccupancyError::InvalidSegment {
        reservation: reservation.reservation_id,
        source,
    })
}

/// Number of seats in the bucket that are free for the requested segment.
pub fn free_seats(
    seats: &[Seat],
    bucket: SeatBucket,
    occupancy: &OccupancyMap,
    requested: &Segment,
) -> usize {
    seats
        .iter()
        .filter(|s| bucket.contains(s.seat_class, s.is_smoking_seat))
        .filter(|s| !occupancy.is_occupied(&s.position(), requested))
        .count()
}

/// Availability tier of one bucket.
///
/// Non-reserved seating is not tracked per seat and is always reported as
/// full.
pub fn bucket_availability(
    seats: &[Seat],
    bucket: SeatBucket,
    occupancy: &OccupancyMap,
    requested: &Segment,
) -> Availability {
    if !bucket.seat_class().is_reservable() {
        return Availability::Full;
    }
    Availability::from_free_seats(free_seats(seats, bucket, occupancy, requested))
}

/// Availability of every bucket, each computed independently.
pub fn availability_by_bucket(
    seats: &[Seat],
    occupancy: &OccupancyMap,
    requested: &Segment,
) -> BTreeMap<SeatBucket, Availability> {
    SeatBucket::ALL
        .into_iter()
        .map(|bucket| (bucket, bucket_availability(seats, bucket, occupancy, requested)))
        .collect()
}
