//! Caching layer for seat maps.
//!
//! Seat maps are reference data: they never change while the server runs,
//! but every search and every seat listing reads them. Maps are cached per
//! train class, either whole or for a single car.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Seat, TrainClass};
use crate::storage::StorageError;

/// Cache key: (train class, car number). `None` is the whole class.
type SeatMapKey = (TrainClass, Option<u32>);

/// Cached seat map entry.
type SeatMapEntry = Arc<Vec<Seat>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 256,
        }
    }
}

/// Cache for seat maps read from storage.
pub struct SeatMapCache {
    maps: MokaCache<SeatMapKey, SeatMapEntry>,
}

impl SeatMapCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let maps = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { maps }
    }

    /// Seat map of every car of `train_class`, loading it with `load` on a miss.
    pub async fn class_seats<F>(&self, train_class: TrainClass, load: F) -> Result<SeatMapEntry, StorageError>
    where
        F: Future<Output = Result<Vec<Seat>, StorageError>>,
    {
        self.get_or_load((train_class, None), load).await
    }

    /// Seat map of one car, loading it with `load` on a miss.
    pub async fn car_seats<F>(
        &self,
        train_class: TrainClass,
        car_number: u32,
        load: F,
    ) -> Result<SeatMapEntry, StorageError>
    where
        F: Future<Output = Result<Vec<Seat>, StorageError>>,
    {
        self.get_or_load((train_class, Some(car_number)), load).await
    }

    async fn get_or_load<F>(&self, key: SeatMapKey, load: F) -> Result<SeatMapEntry, StorageError>
    where
        F: Future<Output = Result<Vec<Seat>, StorageError>>,
    {
        // Concurrent misses on one key share a single load; failures are not cached
        self.maps
            .try_get_with(key, async move { load.await.map(Arc::new) })
            .await
            .map_err(|e| (*e).clone())
    }
}
