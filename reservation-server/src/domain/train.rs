//! Train run types.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{StationId, TrainClass};

/// Direction of travel along the line.
///
/// Serialized as the `is_nobori` flag of the schedule data: `true` means
/// inbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Direction {
    /// Canonical direction: ascending station id.
    Outbound,
    /// Reversed direction: descending station id.
    Inbound,
}

impl Direction {
    /// Direction a passenger travelling from `from` to `to` must take.
    ///
    /// Returns `None` for a zero-length trip.
    pub fn between(from: StationId, to: StationId) -> Option<Self> {
        match from.cmp(&to) {
            std::cmp::Ordering::Less => Some(Direction::Outbound),
            std::cmp::Ordering::Greater => Some(Direction::Inbound),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_inbound(&self) -> bool {
        matches!(self, Direction::Inbound)
    }

    pub fn reversed(&self) -> Self {
        match self {
            Direction::Outbound => Direction::Inbound,
            Direction::Inbound => Direction::Outbound,
        }
    }
}

impl From<bool> for Direction {
    fn from(is_nobori: bool) -> Self {
        if is_nobori {
            Direction::Inbound
        } else {
            Direction::Outbound
        }
    }
}

impl From<Direction> for bool {
    fn from(direction: Direction) -> Self {
        direction.is_inbound()
    }
}

/// Identity of a train run: one named train of one class on one date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainRunKey {
    pub date: NaiveDate,
    pub train_class: TrainClass,
    pub train_name: String,
}

impl fmt::Display for TrainRunKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.train_class, self.train_name)
    }
}

/// A published train run. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainRun {
    pub date: NaiveDate,
    pub departure_at: NaiveTime,
    pub train_class: TrainClass,
    pub train_name: String,
    pub start_station: String,
    pub last_station: String,
    #[serde(rename = "is_nobori")]
    pub direction: Direction,
}

impl TrainRun {
    pub fn key(&self) -> TrainRunKey {
        TrainRunKey {
            date: self.date,
            train_class: self.train_class,
            train_name: self.train_name.clone(),
        }
    }

    pub fn matches(&self, key: &TrainRunKey) -> bool {
        self.date == key.date
            && self.train_class == key.train_class
            && self.train_name == key.train_name
    }
}
