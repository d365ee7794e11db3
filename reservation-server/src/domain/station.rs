//! Station types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TrainClass;

/// Dense ordinal identifying a station.
///
/// Identifiers double as positions: ordering stations by id gives their
/// physical order along the line in the canonical (outbound) direction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u32);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station on the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    /// Position along the whole line, strictly increasing with `id`.
    #[serde(skip_serializing)]
    pub distance: f64,
    pub is_stop_express: bool,
    pub is_stop_semi_express: bool,
    pub is_stop_local: bool,
}

impl Station {
    /// Whether trains of the given class stop here.
    pub fn is_stop_for(&self, class: TrainClass) -> bool {
        match class {
            TrainClass::Express => self.is_stop_express,
            TrainClass::SemiExpress => self.is_stop_semi_express,
            TrainClass::Local => self.is_stop_local,
        }
    }

    /// Absolute distance to another station.
    pub fn distance_to(&self, other: &Station) -> f64 {
        (other.distance - self.distance).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: u32, distance: f64, flags: (bool, bool, bool)) -> Station {
        Station {
            id: StationId(id),
            name: format!("S{id}"),
            distance,
            is_stop_express: flags.0,
            is_stop_semi_express: flags.1,
            is_stop_local: flags.2,
        }
    }

    #[test]
    fn stop_flags_per_class() {
        let s = station(1, 0.0, (false, true, true));
        assert!(!s.is_stop_for(TrainClass::Express));
        assert!(s.is_stop_for(TrainClass::SemiExpress));
        assert!(s.is_stop_for(TrainClass::Local));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = station(1, 12.5, (true, true, true));
        let b = station(2, 50.0, (true, true, true));
        assert_eq!(a.distance_to(&b), 37.5);
        assert_eq!(b.distance_to(&a), 37.5);
    }

    #[test]
    fn ids_order_by_position() {
        assert!(StationId(3) < StationId(10));
        assert_eq!(format!("{:?}", StationId(7)), "StationId(7)");
        assert_eq!(StationId(7).to_string(), "7");
    }

    #[test]
    fn distance_not_serialized() {
        let json = serde_json::to_value(station(1, 3.0, (true, true, true))).unwrap();
        assert!(json.get("distance").is_none());
        assert_eq!(json["id"], 1);
    }
}
