//! Storage collaborators.
//!
//! The reservation core reads reference data, schedules and reservations
//! through [`StorageReader`] and books seats through [`StorageWriter`].
//! Implementations own isolation: [`StorageWriter::create_reservation`]
//! must re-check seat occupancy and insert in one serialized step, so two
//! overlapping bookings of the same seat can never both commit.

mod error;
mod memory;

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;

use crate::domain::{
    Direction, DistanceFareBand, FareRule, NewReservation, Reservation, ReservationId, Seat,
    SeatClass, SeatPosition, Station, TrainClass, TrainRun, TrainRunKey, UserId,
};

pub use error::StorageError;
pub use memory::{MemoryStorage, ReferenceData};

#[cfg(test)]
pub(crate) use memory::test_support;

/// Read access to reference data, schedules and reservations.
pub trait StorageReader: Send + Sync {
    fn list_stations(&self) -> impl Future<Output = Result<Vec<Station>, StorageError>> + Send;

    /// Runs on `date` of any of `classes`, travelling in `direction`.
    fn list_train_runs(
        &self,
        date: NaiveDate,
        classes: &[TrainClass],
        direction: Direction,
    ) -> impl Future<Output = Result<Vec<TrainRun>, StorageError>> + Send;

    fn get_train_run(
        &self,
        key: &TrainRunKey,
    ) -> impl Future<Output = Result<TrainRun, StorageError>> + Send;

    /// Rules for one class pair, ordered by start date.
    fn list_fare_rules(
        &self,
        train_class: TrainClass,
        seat_class: SeatClass,
    ) -> impl Future<Output = Result<Vec<FareRule>, StorageError>> + Send;

    fn list_distance_fares(
        &self,
    ) -> impl Future<Output = Result<Vec<DistanceFareBand>, StorageError>> + Send;

    /// Seat map of one car, ordered by row then column.
    fn list_seats(
        &self,
        train_class: TrainClass,
        car_number: u32,
    ) -> impl Future<Output = Result<Vec<Seat>, StorageError>> + Send;

    /// Seat map of every car of a class.
    fn list_class_seats(
        &self,
        train_class: TrainClass,
    ) -> impl Future<Output = Result<Vec<Seat>, StorageError>> + Send;

    /// Every reservation on a run, including cancelled ones.
    fn list_reservations_for_run(
        &self,
        run: &TrainRunKey,
    ) -> impl Future<Output = Result<Vec<Reservation>, StorageError>> + Send;

    /// Reservations on a run that hold the given seat, including cancelled ones.
    fn list_reservations_for_run_and_seat(
        &self,
        run: &TrainRunKey,
        seat: &SeatPosition,
    ) -> impl Future<Output = Result<Vec<Reservation>, StorageError>> + Send;

    fn get_reservation(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Reservation, StorageError>> + Send;

    fn list_user_reservations(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Vec<Reservation>, StorageError>> + Send;
}

/// Write access for the booking path.
pub trait StorageWriter: Send + Sync {
    /// Atomically verify that no active reservation on the run holds any of
    /// the requested seats for an overlapping segment, then insert.
    ///
    /// Fails with [`StorageError::SeatTaken`] when the check fails.
    fn create_reservation(
        &self,
        request: NewReservation,
    ) -> impl Future<Output = Result<Reservation, StorageError>> + Send;

    /// Mark a reservation owned by `user` as cancelled, releasing its seats.
    ///
    /// Cancelling an already cancelled reservation succeeds unchanged.
    fn cancel_reservation(
        &self,
        id: ReservationId,
        user: UserId,
    ) -> impl Future<Output = Result<Reservation, StorageError>> + Send;
}

/// Storage providing both halves.
pub trait Storage: StorageReader + StorageWriter + 'static {}

impl<T: StorageReader + StorageWriter + 'static> Storage for T {}

/// Run a storage call under a deadline.
pub async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, StorageError>>,
) -> Result<T, StorageError> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StorageError::Timeout(limit))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timeout_is_reported() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, StorageError>(())
        };
        let err = with_timeout(Duration::from_millis(10), slow).await.unwrap_err();
        assert_eq!(err, StorageError::Timeout(Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn fast_call_passes_through() {
        let fast = async { Ok::<_, StorageError>(42) };
        assert_eq!(with_timeout(Duration::from_secs(1), fast).await.unwrap(), 42);

        let failing = async { Err::<(), _>(StorageError::UnknownStation("X".to_string())) };
        assert_eq!(
            with_timeout(Duration::from_secs(1), failing).await.unwrap_err(),
            StorageError::UnknownStation("X".to_string())
        );
    }
}
