//! Station directory.

use std::collections::HashMap;

use crate::domain::{Direction, Station, StationId, TrainClass};

use super::error::StationError;

/// Read-only catalogue of all stations on the line.
///
/// Built once at startup and shared across requests. Stations are kept
/// sorted by id, which is also their physical order in the outbound
/// direction.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<StationId, usize>,
}

impl StationDirectory {
    /// Build a directory from reference data.
    ///
    /// Rejects duplicate ids or names, and distances that do not strictly
    /// increase with id.
    pub fn new(mut stations: Vec<Station>) -> Result<Self, StationError> {
        stations.sort_by_key(|s| s.id);

        let mut by_name = HashMap::with_capacity(stations.len());
        let mut by_id = HashMap::with_capacity(stations.len());

        for (idx, station) in stations.iter().enumerate() {
            if by_id.insert(station.id, idx).is_some() {
                return Err(StationError::InvalidData {
                    message: format!("duplicate station id {}", station.id),
                });
            }
            if by_name.insert(station.name.clone(), idx).is_some() {
                return Err(StationError::InvalidData {
                    message: format!("duplicate station name {}", station.name),
                });
            }
        }

        if let Some(pair) = stations.windows(2).find(|w| w[1].distance <= w[0].distance) {
            return Err(StationError::InvalidData {
                message: format!(
                    "distance of {} ({}) does not exceed {} ({})",
                    pair[1].name, pair[1].distance, pair[0].name, pair[0].distance
                ),
            });
        }

        Ok(Self {
            stations,
            by_name,
            by_id,
        })
    }

    pub fn station_by_name(&self, name: &str) -> Result<&Station, StationError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.stations[idx])
            .ok_or_else(|| StationError::UnknownName(name.to_string()))
    }

    pub fn station_by_id(&self, id: StationId) -> Result<&Station, StationError> {
        self.by_id
            .get(&id)
            .map(|&idx| &self.stations[idx])
            .ok_or(StationError::UnknownId(id))
    }

    /// Stations in travel order for the given direction.
    pub fn ordered_stations(
        &self,
        direction: Direction,
    ) -> Box<dyn Iterator<Item = &Station> + '_> {
        match direction {
            Direction::Outbound => Box::new(self.stations.iter()),
            Direction::Inbound => Box::new(self.stations.iter().rev()),
        }
    }

    /// Train classes that stop at both stations.
    pub fn usable_train_classes(&self, from: &Station, to: &Station) -> Vec<TrainClass> {
        TrainClass::ALL
            .into_iter()
            .filter(|&class| from.is_stop_for(class) && to.is_stop_for(class))
            .collect()
    }

    /// All stations, ordered by id.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn lookup_by_name_and_id() {
        let dir = abc_directory();
        assert_eq!(dir.station_by_name("B").unwrap().id, StationId(2));
        assert_eq!(dir.station_by_id(StationId(3)).unwrap().name, "C");
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn missing_station_is_not_found() {
        let dir = abc_directory();
        assert_eq!(
            dir.station_by_name("Z").unwrap_err(),
            StationError::UnknownName("Z".to_string())
        );
        assert_eq!(
            dir.station_by_id(StationId(99)).unwrap_err(),
            StationError::UnknownId(StationId(99))
        );
    }

    #[test]
    fn ordering_follows_direction() {
        let dir = abc_directory();
        let out: Vec<_> = dir
            .ordered_stations(Direction::Outbound)
            .map(|s| s.name.as_str())
            .collect();
        let inb: Vec<_> = dir
            .ordered_stations(Direction::Inbound)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(out, ["A", "B", "C"]);
        assert_eq!(inb, ["C", "B", "A"]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let dir = StationDirectory::new(vec![
            station(3, "C", 120.0),
            station(1, "A", 0.0),
            station(2, "B", 50.0),
        ])
        .unwrap();
        let ids: Vec<_> = dir.stations().iter().map(|s| s.id.0).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn rejects_duplicates() {
        let dup_id = StationDirectory::new(vec![station(1, "A", 0.0), station(1, "B", 5.0)]);
        assert!(matches!(dup_id, Err(StationError::InvalidData { .. })));

        let dup_name = StationDirectory::new(vec![station(1, "A", 0.0), station(2, "A", 5.0)]);
        assert!(matches!(dup_name, Err(StationError::InvalidData { .. })));
    }

    #[test]
    fn rejects_non_monotonic_distance() {
        let result = StationDirectory::new(vec![station(1, "A", 10.0), station(2, "B", 10.0)]);
        assert!(matches!(result, Err(StationError::InvalidData { .. })));
    }

    #[test]
    fn usable_classes_require_both_stops() {
        let mut a = station(1, "A", 0.0);
        let mut b = station(2, "B", 10.0);
        a.is_stop_express = false;
        b.is_stop_semi_express = false;
        let dir = StationDirectory::new(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(dir.usable_train_classes(&a, &b), [TrainClass::Local]);
    }
}
