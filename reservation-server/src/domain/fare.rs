//! Fare reference data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{SeatClass, TrainClass};

/// Base fare for trips up to `distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceFareBand {
    pub distance: f64,
    pub fare: u32,
}

/// Multiplier for a (train class, seat class) pair, effective from
/// `start_date` until superseded by a later rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareRule {
    pub train_class: TrainClass,
    pub seat_class: SeatClass,
    pub start_date: NaiveDate,
    pub fare_multiplier: f64,
}
