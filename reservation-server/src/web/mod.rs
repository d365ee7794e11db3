//! Web layer for the reservation service.
//!
//! Provides JSON endpoints for station, fare, search, seat and booking
//! operations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
