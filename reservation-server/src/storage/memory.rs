//! In-memory storage seeded from JSON reference data.
//!
//! Reference data and schedules are immutable after loading. Reservations
//! live behind a single `RwLock`; every write takes the lock exclusively,
//! which makes the booking check-then-insert a serialized transaction.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    Direction, DistanceFareBand, FareRule, NewReservation, Reservation, ReservationId,
    ReservationStatus, Seat, SeatClass, SeatPosition, Station, StationId, TrainClass, TrainRun,
    TrainRunKey, UserId,
};
use crate::route::segments_overlap;

use super::error::StorageError;
use super::{StorageReader, StorageWriter};

/// Static tables the service is seeded with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceData {
    pub stations: Vec<Station>,
    pub distance_fares: Vec<DistanceFareBand>,
    pub fares: Vec<FareRule>,
    pub trains: Vec<TrainRun>,
    pub seats: Vec<Seat>,
}

impl ReferenceData {
    /// Load reference data from a directory.
    ///
    /// Expects `stations.json`, `distance_fares.json`, `fares.json`,
    /// `trains.json` and `seats.json`, each holding a JSON array.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = data_dir.as_ref();
        Ok(Self {
            stations: read_json(&dir.join("stations.json"))?,
            distance_fares: read_json(&dir.join("distance_fares.json"))?,
            fares: read_json(&dir.join("fares.json"))?,
            trains: read_json(&dir.join("trains.json"))?,
            seats: read_json(&dir.join("seats.json"))?,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let load_error = |message: String| StorageError::Load {
        path: path.display().to_string(),
        message,
    };

    let json = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| load_error(e.to_string()))
}

#[derive(Debug, Default)]
struct ReservationTable {
    next_id: u64,
    rows: Vec<Reservation>,
}

/// Storage backed by process memory.
#[derive(Debug)]
pub struct MemoryStorage {
    reference: ReferenceData,
    station_ids: HashMap<String, StationId>,
    reservations: RwLock<ReservationTable>,
}

impl MemoryStorage {
    pub fn new(reference: ReferenceData) -> Self {
        let station_ids = reference
            .stations
            .iter()
            .map(|s| (s.name.clone(), s.id))
            .collect();

        Self {
            reference,
            station_ids,
            reservations: RwLock::new(ReservationTable::default()),
        }
    }

    /// Load reference data from a directory and start with no reservations.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::new(ReferenceData::load(data_dir)?))
    }

    fn find_run(&self, key: &TrainRunKey) -> Result<&TrainRun, StorageError> {
        self.reference
            .trains
            .iter()
            .find(|t| t.matches(key))
            .ok_or_else(|| StorageError::RunNotFound(key.clone()))
    }

    fn station_id(&self, name: &str) -> Result<StationId, StorageError> {
        self.station_ids
            .get(name)
            .copied()
            .ok_or_else(|| StorageError::UnknownStation(name.to_string()))
    }

    fn has_seat(&self, train_class: TrainClass, position: &SeatPosition) -> bool {
        self.reference
            .seats
            .iter()
            .any(|s| s.train_class == train_class && s.is_at(position))
    }
}

impl StorageReader for MemoryStorage {
    async fn list_stations(&self) -> Result<Vec<Station>, StorageError> {
        let mut stations = self.reference.stations.clone();
        stations.sort_by_key(|s| s.id);
        Ok(stations)
    }

    async fn list_train_runs(
        &self,
        date: NaiveDate,
        classes: &[TrainClass],
        direction: Direction,
    ) -> Result<Vec<TrainRun>, StorageError> {
        let mut runs: Vec<TrainRun> = self
            .reference
            .trains
            .iter()
            .filter(|t| t.date == date && t.direction == direction && classes.contains(&t.train_class))
            .cloned()
            .collect();
        runs.sort_by(|a, b| a.departure_at.cmp(&b.departure_at).then_with(|| a.train_name.cmp(&b.train_name)));
        Ok(runs)
    }

    async fn get_train_run(&self, key: &TrainRunKey) -> Result<TrainRun, StorageError> {
        self.find_run(key).cloned()
    }

    async fn list_fare_rules(
        &self,
        train_class: TrainClass,
        seat_class: SeatClass,
    ) -> Result<Vec<FareRule>, StorageError> {
        let mut rules: Vec<FareRule> = self
            .reference
            .fares
            .iter()
            .filter(|f| f.train_class == train_class && f.seat_class == seat_class)
            .cloned()
            .collect();
        rules.sort_by_key(|f| f.start_date);
        Ok(rules)
    }

    async fn list_distance_fares(&self) -> Result<Vec<DistanceFareBand>, StorageError> {
        Ok(self.reference.distance_fares.clone())
    }

    async fn list_seats(
        &self,
        train_class: TrainClass,
        car_number: u32,
    ) -> Result<Vec<Seat>, StorageError> {
        let mut seats: Vec<Seat> = self
            .reference
            .seats
            .iter()
            .filter(|s| s.train_class == train_class && s.car_number == car_number)
            .cloned()
            .collect();
        seats.sort_by(|a, b| a.position().cmp(&b.position()));
        Ok(seats)
    }

    async fn list_class_seats(&self, train_class: TrainClass) -> Result<Vec<Seat>, StorageError> {
        let mut seats: Vec<Seat> = self
            .reference
            .seats
            .iter()
            .filter(|s| s.train_class == train_class)
            .cloned()
            .collect();
        seats.sort_by(|a, b| a.position().cmp(&b.position()));
        Ok(seats)
    }

    async fn list_reservations_for_run(
        &self,
        run: &TrainRunKey,
    ) -> Result<Vec<Reservation>, StorageError> {
        let table = self.reservations.read().await;
        Ok(table.rows.iter().filter(|r| &r.run == run).cloned().collect())
    }

    async fn list_reservations_for_run_and_seat(
        &self,
        run: &TrainRunKey,
        seat: &SeatPosition,
    ) -> Result<Vec<Reservation>, StorageError> {
        let table = self.reservations.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|r| &r.run == run && r.holds(seat))
            .cloned()
            .collect())
    }

    async fn get_reservation(&self, id: ReservationId) -> Result<Reservation, StorageError> {
        let table = self.reservations.read().await;
        table
            .rows
            .iter()
            .find(|r| r.reservation_id == id)
            .cloned()
            .ok_or(StorageError::ReservationNotFound(id))
    }

    async fn list_user_reservations(&self, user: UserId) -> Result<Vec<Reservation>, StorageError> {
        let table = self.reservations.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|r| r.user_id == user)
            .cloned()
            .collect())
    }
}

impl StorageWriter for MemoryStorage {
    async fn create_reservation(&self, request: NewReservation) -> Result<Reservation, StorageError> {
        if request.seats.is_empty() {
            return Err(StorageError::InvalidReservation {
                message: "no seats requested".to_string(),
            });
        }

        let run = self.find_run(&request.run)?;
        let from = self.station_id(&request.departure)?;
        let to = self.station_id(&request.arrival)?;
        if Direction::between(from, to) != Some(run.direction) {
            return Err(StorageError::InvalidReservation {
                message: format!(
                    "{} -> {} is not a segment of {}",
                    request.departure, request.arrival, request.run
                ),
            });
        }
        if let Some(seat) = request.seats.iter().find(|s| !self.has_seat(run.train_class, s)) {
            return Err(StorageError::InvalidReservation {
                message: format!("{seat} does not exist on {} trains", run.train_class),
            });
        }

        // Held until the insert completes: no other booking can commit in between
        let mut table = self.reservations.write().await;

        for existing in table
            .rows
            .iter()
            .filter(|r| r.is_active() && r.run == request.run)
        {
            let Some(seat) = request.seats.iter().find(|s| existing.holds(s)) else {
                continue;
            };
            let held_from = self.station_id(&existing.departure)?;
            let held_to = self.station_id(&existing.arrival)?;
            if segments_overlap(from, to, held_from, held_to, run.direction) {
                return Err(StorageError::SeatTaken {
                    run: request.run.clone(),
                    seat: seat.clone(),
                });
            }
        }

        table.next_id += 1;
        let reservation = Reservation {
            reservation_id: ReservationId(table.next_id),
            user_id: request.user_id,
            run: request.run,
            departure: request.departure,
            arrival: request.arrival,
            seats: request.seats,
            status: ReservationStatus::Reserved,
            payment_id: request.payment_id,
        };
        table.rows.push(reservation.clone());
        debug!(id = %reservation.reservation_id, run = %reservation.run, "reservation committed");

        Ok(reservation)
    }

    async fn cancel_reservation(
        &self,
        id: ReservationId,
        user: UserId,
    ) -> Result<Reservation, StorageError> {
        let mut table = self.reservations.write().await;
        let reservation = table
            .rows
            .iter_mut()
            .find(|r| r.reservation_id == id && r.user_id == user)
            .ok_or(StorageError::ReservationNotFound(id))?;

        reservation.status = ReservationStatus::Cancelled;
        Ok(reservation.clone())
    }
}
