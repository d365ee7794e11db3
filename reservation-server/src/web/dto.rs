//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::Availability;
use crate::domain::{Reservation, ReservationStatus, SeatBucket, SeatPosition, Station};
use crate::service::{CarSeats, SearchResult, SeatStatus};

/// Query for `GET /api/train/search`.
#[derive(Debug, Deserialize)]
pub struct TrainSearchRequest {
    /// RFC 3339 timestamp; its date in the service time zone selects runs
    pub use_at: String,

    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// Optional train class filter (`express`, `semi_express`, `local`)
    pub train_class: Option<String>,
}

/// A run in search results.
#[derive(Debug, Serialize)]
pub struct TrainSearchResult {
    pub train_class: String,
    pub train_name: String,

    /// First station of the run
    pub start: String,

    /// Last station of the run
    pub last: String,

    /// Requested boarding station
    pub departure: String,

    /// Requested alighting station
    pub destination: String,

    /// Departure of the run from its first station, HH:MM:SS
    pub departure_at: String,

    pub seat_availability: BTreeMap<SeatBucket, Availability>,
    pub seat_fare: BTreeMap<SeatBucket, u32>,
}

/// Query for `GET /api/train/seats`.
#[derive(Debug, Deserialize)]
pub struct TrainSeatsRequest {
    pub date: NaiveDate,
    pub train_class: String,
    pub train_name: String,
    pub car_number: u32,
    pub from: String,
    pub to: String,
}

/// Seat map of one car.
#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub date: NaiveDate,
    pub train_class: String,
    pub train_name: String,
    pub car_number: u32,
    pub seats: Vec<SeatResult>,
}

/// A seat in a car seat map.
#[derive(Debug, Serialize)]
pub struct SeatResult {
    pub row: u32,
    pub column: String,
    pub class: String,
    pub is_smoking_seat: bool,
    pub is_occupied: bool,
}

/// Body of `POST /api/train/reserve`.
#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    pub user_id: u64,
    pub date: NaiveDate,
    pub train_class: String,
    pub train_name: String,
    pub departure: String,
    pub arrival: String,
    pub seats: Vec<SeatPosition>,
    pub payment_id: Option<String>,
}

/// Query carrying the caller identity.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: u64,
}

/// A reservation as returned to its owner.
#[derive(Debug, Serialize)]
pub struct ReservationResult {
    pub reservation_id: u64,
    pub date: NaiveDate,
    pub train_class: String,
    pub train_name: String,
    pub departure: String,
    pub arrival: String,
    pub seats: Vec<SeatPosition>,
    pub status: ReservationStatus,

    /// Total fare, present on the booking response only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ReservationListResponse {
    pub reservations: Vec<ReservationResult>,
}

#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<Station>,
}

/// A distance fare band.
#[derive(Debug, Serialize)]
pub struct DistanceFareResult {
    pub distance: f64,
    pub fare: u32,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<SearchResult> for TrainSearchResult {
    fn from(result: SearchResult) -> Self {
        Self {
            train_class: result.run.train_class.to_string(),
            train_name: result.run.train_name,
            start: result.run.start_station,
            last: result.run.last_station,
            departure: result.departure,
            destination: result.arrival,
            departure_at: result.run.departure_at.format("%H:%M:%S").to_string(),
            seat_availability: result.seat_availability,
            seat_fare: result.seat_fare,
        }
    }
}

impl From<&SeatStatus> for SeatResult {
    fn from(status: &SeatStatus) -> Self {
        Self {
            row: status.seat.seat_row,
            column: status.seat.seat_column.clone(),
            class: status.seat.seat_class.to_string(),
            is_smoking_seat: status.seat.is_smoking_seat,
            is_occupied: status.is_occupied,
        }
    }
}

impl From<CarSeats> for CarResponse {
    fn from(car: CarSeats) -> Self {
        Self {
            date: car.run.date,
            train_class: car.run.train_class.to_string(),
            train_name: car.run.train_name,
            car_number: car.car_number,
            seats: car.seats.iter().map(SeatResult::from).collect(),
        }
    }
}

impl ReservationResult {
    pub fn from_reservation(reservation: Reservation, fare: Option<u32>) -> Self {
        Self {
            reservation_id: reservation.reservation_id.0,
            date: reservation.run.date,
            train_class: reservation.run.train_class.to_string(),
            train_name: reservation.run.train_name,
            departure: reservation.departure,
            arrival: reservation.arrival,
            seats: reservation.seats,
            status: reservation.status,
            fare,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, TrainClass, TrainRun};
    use chrono::NaiveTime;

    #[test]
    fn search_result_serializes_bucket_maps() {
        let result = SearchResult {
            run: TrainRun {
                date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                departure_at: NaiveTime::from_hms_opt(6, 5, 0).unwrap(),
                train_class: TrainClass::SemiExpress,
                train_name: "12".to_string(),
                start_station: "A".to_string(),
                last_station: "C".to_string(),
                direction: Direction::Outbound,
            },
            departure: "A".to_string(),
            arrival: "B".to_string(),
            seat_availability: [(SeatBucket::Reserved, Availability::Limited)].into(),
            seat_fare: [(SeatBucket::PremiumSmoke, 1500)].into(),
        };

        let json = serde_json::to_value(TrainSearchResult::from(result)).unwrap();
        assert_eq!(json["train_class"], "semi_express");
        assert_eq!(json["departure_at"], "06:05:00");
        assert_eq!(json["destination"], "B");
        assert_eq!(json["seat_availability"]["reserved"], "△");
        assert_eq!(json["seat_fare"]["premium_smoke"], 1500);
    }

    #[test]
    fn fare_is_omitted_from_listings() {
        let reservation = Reservation {
            reservation_id: crate::domain::ReservationId(3),
            user_id: crate::domain::UserId(1),
            run: crate::domain::TrainRunKey {
                date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                train_class: TrainClass::Local,
                train_name: "9".to_string(),
            },
            departure: "A".to_string(),
            arrival: "B".to_string(),
            seats: vec![],
            status: ReservationStatus::Cancelled,
            payment_id: None,
        };

        let json = serde_json::to_value(ReservationResult::from_reservation(reservation, None)).unwrap();
        assert_eq!(json["reservation_id"], 3);
        assert_eq!(json["status"], "cancelled");
        assert!(json.get("fare").is_none());
    }
}
