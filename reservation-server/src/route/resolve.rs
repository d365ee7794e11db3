//! Route resolution: which stations a run actually calls at.

use crate::domain::{Station, StationId, TrainRun};
use crate::stations::StationDirectory;

/// Schedule data that disagrees with the station directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The run names a terminal station the directory does not know
    #[error("train {train} references unknown station {station}")]
    UnknownStation { train: String, station: String },

    /// The last station is never reached travelling in the run's direction
    #[error("train {train} never reaches {last} after {start}")]
    LastNotReached {
        train: String,
        start: String,
        last: String,
    },
}

/// Resolve the ordered list of stations a run calls at.
///
/// Stations are scanned in the run's direction. Scanning begins at the
/// declared start station and ends at the declared last station, both
/// inclusive. Intermediate stations are kept only when the run's class
/// stops there; the terminals are always kept.
pub fn resolve_route<'a>(
    directory: &'a StationDirectory,
    run: &TrainRun,
) -> Result<Vec<&'a Station>, RouteError> {
    for name in [&run.start_station, &run.last_station] {
        if directory.station_by_name(name).is_err() {
            return Err(RouteError::UnknownStation {
                train: run.train_name.clone(),
                station: name.clone(),
            });
        }
    }

    let mut route = Vec::new();
    let mut started = false;

    for station in directory.ordered_stations(run.direction) {
        if !started {
            // Stations before the start are never called at
            if station.name != run.start_station {
                continue;
            }
            started = true;
        }

        let is_terminal = station.name == run.start_station || station.name == run.last_station;
        if is_terminal || station.is_stop_for(run.train_class) {
            route.push(station);
        }

        if station.name == run.last_station {
            return Ok(route);
        }
    }

    Err(RouteError::LastNotReached {
        train: run.train_name.clone(),
        start: run.start_station.clone(),
        last: run.last_station.clone(),
    })
}

/// Whether a resolved route carries passengers from `origin` to `destination`.
///
/// Both stations must be on the route, with the origin strictly before the
/// destination in travel order.
pub fn serves_segment(route: &[&Station], origin: StationId, destination: StationId) -> bool {
    let position = |id: StationId| route.iter().position(|s| s.id == id);

    match (position(origin), position(destination)) {
        (Some(o), Some(d)) => o < d,
        _ => false,
    }
}
