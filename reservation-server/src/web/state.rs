//! Application state for the web layer.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::service::ReservationService;
use crate::storage::MemoryStorage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Reservation service over in-memory storage
    pub service: Arc<ReservationService<MemoryStorage>>,

    /// Time zone used to turn search timestamps into service dates
    pub utc_offset: FixedOffset,
}

impl AppState {
    /// Create a new app state.
    pub fn new(service: ReservationService<MemoryStorage>, utc_offset: FixedOffset) -> Self {
        Self {
            service: Arc::new(service),
            utc_offset,
        }
    }
}
