//! Seat map types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{SeatClass, TrainClass};

/// Physical location of a seat within a train.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatPosition {
    pub car_number: u32,
    pub seat_row: u32,
    pub seat_column: String,
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car {} seat {}{}", self.car_number, self.seat_row, self.seat_column)
    }
}

/// A seat in the static seat map of a train class.
///
/// Seat maps are identical across every run of the same class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub train_class: TrainClass,
    pub car_number: u32,
    pub seat_column: String,
    pub seat_row: u32,
    pub seat_class: SeatClass,
    pub is_smoking_seat: bool,
}

impl Seat {
    pub fn position(&self) -> SeatPosition {
        SeatPosition {
            car_number: self.car_number,
            seat_row: self.seat_row,
            seat_column: self.seat_column.clone(),
        }
    }

    pub fn is_at(&self, position: &SeatPosition) -> bool {
        self.car_number == position.car_number
            && self.seat_row == position.seat_row
            && self.seat_column == position.seat_column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_matches_seat() {
        let seat = Seat {
            train_class: TrainClass::Express,
            car_number: 2,
            seat_column: "A".to_string(),
            seat_row: 7,
            seat_class: SeatClass::Reserved,
            is_smoking_seat: false,
        };
        let pos = seat.position();
        assert!(seat.is_at(&pos));
        assert_eq!(pos.to_string(), "car 2 seat 7A");

        let other = SeatPosition {
            seat_column: "B".to_string(),
            ..pos
        };
        assert!(!seat.is_at(&other));
    }
}
