//! Seat listing for one car of one run.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::OccupancyMap;
use crate::domain::{Seat, Segment, TrainClass, TrainRunKey};
use crate::route::{resolve_route, serves_segment};
use crate::storage::Storage;

use super::{ReservationError, ReservationService};

/// Seat map request for one car and one requested segment.
#[derive(Debug, Clone)]
pub struct SeatQuery {
    pub date: NaiveDate,
    pub train_class: TrainClass,
    pub train_name: String,
    pub car_number: u32,
    pub from: String,
    pub to: String,
}

impl SeatQuery {
    pub fn run_key(&self) -> TrainRunKey {
        TrainRunKey {
            date: self.date,
            train_class: self.train_class,
            train_name: self.train_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatStatus {
    #[serde(flatten)]
    pub seat: Seat,
    pub is_occupied: bool,
}

/// Seat map of one car with occupancy for the requested segment.
#[derive(Debug, Clone, Serialize)]
pub struct CarSeats {
    #[serde(flatten)]
    pub run: TrainRunKey,
    pub car_number: u32,
    pub seats: Vec<SeatStatus>,
}

impl<S: Storage> ReservationService<S> {
    /// Every seat of the car, flagged occupied when an active reservation
    /// holds it for a section of the requested segment.
    pub async fn seats(&self, query: &SeatQuery) -> Result<CarSeats, ReservationError> {
        let key = query.run_key();
        let run = self.call(self.storage.get_train_run(&key)).await?;

        let from = self.station(&query.from)?;
        let to = self.station(&query.to)?;
        let requested = Segment::new(from.id, to.id, run.direction)?;
        if !serves_segment(&resolve_route(&self.directory, &run)?, from.id, to.id) {
            return Err(ReservationError::InvalidSegment(format!(
                "{key} does not carry passengers from {} to {}",
                from.name, to.name
            )));
        }

        let seats = self.car_seats(run.train_class, query.car_number).await?;
        if seats.is_empty() {
            return Err(ReservationError::not_found(
                "car",
                format!("{} car {}", run.train_class, query.car_number),
            ));
        }

        let reservations = self.call(self.storage.list_reservations_for_run(&key)).await?;
        let occupancy = OccupancyMap::build(&self.directory, &run, &reservations)?;

        let seats = seats
            .iter()
            .map(|seat| SeatStatus {
                is_occupied: occupancy.is_occupied(&seat.position(), &requested),
                seat: seat.clone(),
            })
            .collect();

        Ok(CarSeats {
            run: key,
            car_number: query.car_number,
            seats,
        })
    }
}
