//! Fare table and fare calculation.
//!
//! A fare is a distance-banded base fare scaled by a multiplier chosen by
//! train class, seat class and travel date.

mod calculator;
mod error;
mod table;

pub use calculator::FareCalculator;
pub use error::FareError;
pub use table::FareTable;
