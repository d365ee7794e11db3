//! Domain types for the reservation service.
//!
//! This module contains the reference data (stations, fares, seat maps),
//! schedule data (train runs) and the reservation records the rest of the
//! crate operates on. Types that carry an invariant enforce it at
//! construction time.

mod class;
mod fare;
mod reservation;
mod seat;
mod segment;
mod station;
mod train;

pub use class::{InvalidClass, SeatBucket, SeatClass, TrainClass};
pub use fare::{DistanceFareBand, FareRule};
pub use reservation::{NewReservation, Reservation, ReservationId, ReservationStatus, UserId};
pub use seat::{Seat, SeatPosition};
pub use segment::{InvalidSegment, Segment};
pub(crate) use segment::canonical_span;
pub use station::{Station, StationId};
pub use train::{Direction, TrainRun, TrainRunKey};
