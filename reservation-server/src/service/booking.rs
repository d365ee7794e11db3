//! Booking, cancellation and reservation listing.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::availability::reservation_segment;
use crate::domain::{
    NewReservation, Reservation, ReservationId, SeatPosition, Segment, TrainClass, TrainRunKey,
    UserId,
};
use crate::fares::FareCalculator;
use crate::route::{resolve_route, serves_segment};
use crate::storage::{Storage, StorageError};

use super::{ReservationError, ReservationService};

/// Request to reserve specific seats on a run for a segment.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub train_class: TrainClass,
    pub train_name: String,
    pub departure: String,
    pub arrival: String,
    pub seats: Vec<SeatPosition>,
    pub payment_id: Option<String>,
}

/// A committed reservation and its total fare.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub reservation: Reservation,
    pub fare: u32,
}

impl<S: Storage> ReservationService<S> {
    /// Reserve seats for a segment.
    ///
    /// Availability is checked here first so the common failure is cheap;
    /// storage re-checks under its write lock, and losing that race is a
    /// [`ReservationError::Conflict`] as well.
    pub async fn reserve(&self, request: BookingRequest) -> Result<Booking, ReservationError> {
        if request.seats.is_empty() {
            return Err(ReservationError::InvalidRequest(
                "at least one seat is required".to_string(),
            ));
        }
        let mut unique = HashSet::new();
        if let Some(seat) = request.seats.iter().find(|s| !unique.insert(*s)) {
            return Err(ReservationError::InvalidRequest(format!("{seat} requested twice")));
        }

        let key = TrainRunKey {
            date: request.date,
            train_class: request.train_class,
            train_name: request.train_name.clone(),
        };
        let run = self.call(self.storage.get_train_run(&key)).await?;

        let from = self.station(&request.departure)?;
        let to = self.station(&request.arrival)?;
        let requested = Segment::new(from.id, to.id, run.direction)?;
        if !serves_segment(&resolve_route(&self.directory, &run)?, from.id, to.id) {
            return Err(ReservationError::InvalidSegment(format!(
                "{key} does not carry passengers from {} to {}",
                from.name, to.name
            )));
        }

        let class_seats = self.class_seats(run.train_class).await?;
        let calculator = FareCalculator::new(&self.directory, &self.fares);
        let mut fare = 0;
        for position in &request.seats {
            let seat = class_seats
                .iter()
                .find(|s| s.is_at(position))
                .ok_or_else(|| ReservationError::not_found("seat", format!("{key} {position}")))?;
            if !seat.seat_class.is_reservable() {
                return Err(ReservationError::InvalidRequest(format!(
                    "{position} is {} and cannot be reserved",
                    seat.seat_class
                )));
            }
            let seat_fare = calculator.fare(run.date, from.id, to.id, run.train_class, seat.seat_class)?;
            fare = add_fare(fare, seat_fare)?;
        }

        for position in &request.seats {
            let held = self
                .call(self.storage.list_reservations_for_run_and_seat(&key, position))
                .await?;
            for existing in held.iter().filter(|r| r.is_active()) {
                if requested.overlaps(&reservation_segment(&self.directory, &run, existing)?) {
                    return Err(ReservationError::Conflict {
                        run: key,
                        seat: position.clone(),
                    });
                }
            }
        }

        let new = NewReservation {
            user_id: request.user_id,
            run: key,
            departure: from.name.clone(),
            arrival: to.name.clone(),
            seats: request.seats,
            payment_id: request.payment_id,
        };
        let reservation = match self.call(self.storage.create_reservation(new)).await {
            Ok(reservation) => reservation,
            Err(e @ StorageError::SeatTaken { .. }) => {
                warn!(error = %e, "booking lost a race to a concurrent reservation");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            id = %reservation.reservation_id,
            run = %reservation.run,
            from = %reservation.departure,
            to = %reservation.arrival,
            seats = reservation.seats.len(),
            fare,
            "reservation created"
        );
        Ok(Booking { reservation, fare })
    }

    /// Cancel a reservation owned by `user`. Cancelling twice is not an error.
    pub async fn cancel(&self, id: ReservationId, user: UserId) -> Result<Reservation, ReservationError> {
        let reservation = self.call(self.storage.cancel_reservation(id, user)).await?;
        info!(id = %id, run = %reservation.run, "reservation cancelled");
        Ok(reservation)
    }

    /// One reservation, visible only to its owner.
    pub async fn reservation(&self, id: ReservationId, user: UserId) -> Result<Reservation, ReservationError> {
        let reservation = self.call(self.storage.get_reservation(id)).await?;
        if reservation.user_id != user {
            return Err(ReservationError::not_found("reservation", id));
        }
        Ok(reservation)
    }

    /// Every reservation of a user, cancelled ones included.
    pub async fn user_reservations(&self, user: UserId) -> Result<Vec<Reservation>, ReservationError> {
        Ok(self.call(self.storage.list_user_reservations(user)).await?)
    }
}

fn add_fare(total: u32, seat_fare: u32) -> Result<u32, ReservationError> {
    total
        .checked_add(seat_fare)
        .ok_or_else(|| ReservationError::Consistency(format!("fare total overflows adding {seat_fare} to {total}")))
}
