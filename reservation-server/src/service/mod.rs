//! Reservation service.
//!
//! Orchestrates the pure core (station directory, route resolver, overlap
//! engine, availability aggregator, fare calculator) over injected storage.
//! The station directory and fare table are built once by
//! [`ReservationService::bootstrap`] and shared read-only; schedules and
//! reservations are re-read on every call.

mod booking;
mod error;
mod search;
mod seats;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::{CacheConfig, SeatMapCache};
use crate::domain::{Seat, SeatClass, Station, TrainClass};
use crate::fares::FareTable;
use crate::stations::StationDirectory;
use crate::storage::{Storage, StorageError, with_timeout};

pub use booking::{Booking, BookingRequest};
pub use error::ReservationError;
pub use search::{SearchQuery, SearchResult};
pub use seats::{CarSeats, SeatQuery, SeatStatus};

/// Configuration for the reservation service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Deadline applied to every storage call.
    pub storage_timeout: Duration,

    /// Seat map cache settings.
    pub cache: CacheConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            storage_timeout: Duration::from_secs(2),
            cache: CacheConfig::default(),
        }
    }
}

/// The reservation service, generic over its storage.
pub struct ReservationService<S> {
    storage: Arc<S>,
    directory: Arc<StationDirectory>,
    fares: Arc<FareTable>,
    seat_maps: SeatMapCache,
    storage_timeout: Duration,
}

impl<S: Storage> ReservationService<S> {
    /// Build the station directory and fare table from storage.
    ///
    /// Reference data that violates a directory or fare table invariant is a
    /// consistency error and stops startup.
    pub async fn bootstrap(storage: Arc<S>, config: ServiceConfig) -> Result<Self, ReservationError> {
        let limit = config.storage_timeout;

        let stations = with_timeout(limit, storage.list_stations()).await?;
        let directory = StationDirectory::new(stations)
            .map_err(|e| ReservationError::Consistency(e.to_string()))?;

        let bands = with_timeout(limit, storage.list_distance_fares()).await?;
        let mut rules = Vec::new();
        for train_class in TrainClass::ALL {
            for seat_class in SeatClass::ALL {
                rules.extend(with_timeout(limit, storage.list_fare_rules(train_class, seat_class)).await?);
            }
        }
        let fares = FareTable::new(bands, rules)?;

        info!(
            stations = directory.len(),
            fare_bands = fares.bands().len(),
            "reference data loaded"
        );

        Ok(Self {
            storage,
            directory: Arc::new(directory),
            fares: Arc::new(fares),
            seat_maps: SeatMapCache::new(&config.cache),
            storage_timeout: limit,
        })
    }

    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    pub fn fare_table(&self) -> &FareTable {
        &self.fares
    }

    /// Run a storage call under the configured deadline.
    async fn call<T>(
        &self,
        call: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        with_timeout(self.storage_timeout, call).await
    }

    fn station(&self, name: &str) -> Result<&Station, ReservationError> {
        self.directory
            .station_by_name(name)
            .map_err(|_| ReservationError::not_found("station", name))
    }

    async fn class_seats(&self, train_class: TrainClass) -> Result<Arc<Vec<Seat>>, ReservationError> {
        let load = self.call(self.storage.list_class_seats(train_class));
        Ok(self.seat_maps.class_seats(train_class, load).await?)
    }

    async fn car_seats(
        &self,
        train_class: TrainClass,
        car_number: u32,
    ) -> Result<Arc<Vec<Seat>>, ReservationError> {
        let load = self.call(self.storage.list_seats(train_class, car_number));
        Ok(self.seat_maps.car_seats(train_class, car_number, load).await?)
    }
}
