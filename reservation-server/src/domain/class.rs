//! Train and seat classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown class name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct InvalidClass {
    kind: &'static str,
    value: String,
}

/// Service class of a train. Each class has its own stopping pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainClass {
    Express,
    SemiExpress,
    Local,
}

impl TrainClass {
    pub const ALL: [TrainClass; 3] = [
        TrainClass::Express,
        TrainClass::SemiExpress,
        TrainClass::Local,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainClass::Express => "express",
            TrainClass::SemiExpress => "semi_express",
            TrainClass::Local => "local",
        }
    }
}

impl FromStr for TrainClass {
    type Err = InvalidClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrainClass::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InvalidClass {
                kind: "train class",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TrainClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class of a seat within a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatClass {
    Premium,
    Reserved,
    /// Unreserved seating. No per-seat reservations are tracked.
    NonReserved,
}

impl SeatClass {
    pub const ALL: [SeatClass; 3] = [
        SeatClass::Premium,
        SeatClass::Reserved,
        SeatClass::NonReserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::Premium => "premium",
            SeatClass::Reserved => "reserved",
            SeatClass::NonReserved => "non_reserved",
        }
    }

    /// Whether individual seats of this class can be reserved.
    pub fn is_reservable(&self) -> bool {
        !matches!(self, SeatClass::NonReserved)
    }
}

impl FromStr for SeatClass {
    type Err = InvalidClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeatClass::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InvalidClass {
                kind: "seat class",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (seat class, smoking) grouping reported as one availability tier
/// and priced as one fare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatBucket {
    Premium,
    PremiumSmoke,
    Reserved,
    ReservedSmoke,
    NonReserved,
}

impl SeatBucket {
    pub const ALL: [SeatBucket; 5] = [
        SeatBucket::Premium,
        SeatBucket::PremiumSmoke,
        SeatBucket::Reserved,
        SeatBucket::ReservedSmoke,
        SeatBucket::NonReserved,
    ];

    pub fn seat_class(&self) -> SeatClass {
        match self {
            SeatBucket::Premium | SeatBucket::PremiumSmoke => SeatClass::Premium,
            SeatBucket::Reserved | SeatBucket::ReservedSmoke => SeatClass::Reserved,
            SeatBucket::NonReserved => SeatClass::NonReserved,
        }
    }

    pub fn is_smoking(&self) -> bool {
        matches!(self, SeatBucket::PremiumSmoke | SeatBucket::ReservedSmoke)
    }

    /// Whether a seat belongs to this bucket. Non-reserved seats are not
    /// split by smoking flag.
    pub fn contains(&self, seat_class: SeatClass, is_smoking_seat: bool) -> bool {
        seat_class == self.seat_class()
            && (seat_class == SeatClass::NonReserved || is_smoking_seat == self.is_smoking())
    }
}
