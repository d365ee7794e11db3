//! Fare calculation for a segment.

use chrono::NaiveDate;

use crate::domain::{SeatClass, StationId, TrainClass};
use crate::stations::StationDirectory;

use super::error::FareError;
use super::table::FareTable;

/// Prices trips using the station directory and fare table.
#[derive(Debug, Clone, Copy)]
pub struct FareCalculator<'a> {
    directory: &'a StationDirectory,
    table: &'a FareTable,
}

impl<'a> FareCalculator<'a> {
    pub fn new(directory: &'a StationDirectory, table: &'a FareTable) -> Self {
        Self { directory, table }
    }

    /// Fare in whole yen for travelling between two stations.
    ///
    /// `round(base_fare(distance) * multiplier)`, where the multiplier comes
    /// from the rule in force on `date`.
    pub fn fare(
        &self,
        date: NaiveDate,
        from: StationId,
        to: StationId,
        train_class: TrainClass,
        seat_class: SeatClass,
    ) -> Result<u32, FareError> {
        let from = self.directory.station_by_id(from)?;
        let to = self.directory.station_by_id(to)?;

        let base = self.table.base_fare(from.distance_to(to))?;
        let rule = self.table.rule_for(train_class, seat_class, date)?;

        Ok((f64::from(base) * rule.fare_multiplier).round() as u32)
    }
}
