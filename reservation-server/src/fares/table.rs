//! Fare table: distance bands and date-effective multipliers.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{DistanceFareBand, FareRule, SeatClass, TrainClass};

use super::error::FareError;

/// Read-only fare reference data.
///
/// # Invariants
///
/// - Bands are sorted by ascending distance threshold
/// - Band fares never decrease as the threshold grows
/// - Rules for each (train class, seat class) are sorted by start date
#[derive(Debug, Clone)]
pub struct FareTable {
    bands: Vec<DistanceFareBand>,
    rules: HashMap<(TrainClass, SeatClass), Vec<FareRule>>,
}

impl FareTable {
    /// Build a fare table from reference data.
    pub fn new(
        mut bands: Vec<DistanceFareBand>,
        rules: Vec<FareRule>,
    ) -> Result<Self, FareError> {
        if let Some(band) = bands.iter().find(|b| !b.distance.is_finite() || b.distance < 0.0) {
            return Err(FareError::InvalidData {
                message: format!("band threshold {} is not a valid distance", band.distance),
            });
        }
        bands.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        if let Some(pair) = bands.windows(2).find(|w| w[1].fare < w[0].fare) {
            return Err(FareError::InvalidData {
                message: format!(
                    "fare for distance {} ({}) is lower than for {} ({})",
                    pair[1].distance, pair[1].fare, pair[0].distance, pair[0].fare
                ),
            });
        }

        let mut by_class: HashMap<(TrainClass, SeatClass), Vec<FareRule>> = HashMap::new();
        for rule in rules {
            if !rule.fare_multiplier.is_finite() || rule.fare_multiplier <= 0.0 {
                return Err(FareError::InvalidData {
                    message: format!(
                        "multiplier {} for {}/{} from {} is not positive",
                        rule.fare_multiplier, rule.train_class, rule.seat_class, rule.start_date
                    ),
                });
            }
            by_class
                .entry((rule.train_class, rule.seat_class))
                .or_default()
                .push(rule);
        }
        for list in by_class.values_mut() {
            list.sort_by_key(|r| r.start_date);
        }

        Ok(Self {
            bands,
            rules: by_class,
        })
    }

    /// Base fare for a trip of the given distance.
    ///
    /// Band thresholds are inclusive upper bounds: a trip of exactly a
    /// band's distance is priced by that band.
    pub fn base_fare(&self, distance: f64) -> Result<u32, FareError> {
        self.bands
            .iter()
            .find(|band| distance <= band.distance)
            .map(|band| band.fare)
            .ok_or(FareError::NoDistanceBand { distance })
    }

    /// The rule in force on `date`: the latest one starting on or before it.
    pub fn rule_for(
        &self,
        train_class: TrainClass,
        seat_class: SeatClass,
        date: NaiveDate,
    ) -> Result<&FareRule, FareError> {
        self.rules
            .get(&(train_class, seat_class))
            .and_then(|rules| rules.iter().rev().find(|r| r.start_date <= date))
            .ok_or(FareError::NoFareRule {
                train_class,
                seat_class,
                date,
            })
    }

    /// Distance bands, ordered by threshold.
    pub fn bands(&self) -> &[DistanceFareBand] {
        &self.bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn band(distance: f64, fare: u32) -> DistanceFareBand {
        DistanceFareBand { distance, fare }
    }

    fn rule(start: NaiveDate, multiplier: f64) -> FareRule {
        FareRule {
            train_class: TrainClass::Express,
            seat_class: SeatClass::Reserved,
            start_date: start,
            fare_multiplier: multiplier,
        }
    }

    fn table() -> FareTable {
        FareTable::new(
            vec![band(150.0, 1500), band(100.0, 1000)],
            vec![
                rule(date(2020, 8, 1), 1.5),
                rule(date(2020, 1, 1), 1.0),
                rule(date(2020, 4, 1), 1.2),
            ],
        )
        .unwrap()
    }

    #[test]
    fn bands_are_sorted() {
        let t = table();
        let thresholds: Vec<_> = t.bands().iter().map(|b| b.distance).collect();
        assert_eq!(thresholds, [100.0, 150.0]);
    }

    #[test]
    fn band_boundary_is_inclusive() {
        let t = table();
        assert_eq!(t.base_fare(99.9).unwrap(), 1000);
        assert_eq!(t.base_fare(100.0).unwrap(), 1000);
        assert_eq!(t.base_fare(100.1).unwrap(), 1500);
        assert_eq!(t.base_fare(150.0).unwrap(), 1500);
    }

    #[test]
    fn beyond_last_band_is_an_error() {
        let t = table();
        assert_eq!(
            t.base_fare(150.5).unwrap_err(),
            FareError::NoDistanceBand { distance: 150.5 }
        );
    }

    #[test]
    fn rule_is_latest_not_after_travel_date() {
        let t = table();
        let pick = |d| {
            t.rule_for(TrainClass::Express, SeatClass::Reserved, d)
                .unwrap()
                .fare_multiplier
        };
        assert_eq!(pick(date(2020, 1, 1)), 1.0);
        assert_eq!(pick(date(2020, 3, 31)), 1.0);
        assert_eq!(pick(date(2020, 4, 1)), 1.2);
        assert_eq!(pick(date(2020, 7, 31)), 1.2);
        assert_eq!(pick(date(2021, 1, 1)), 1.5);
    }

    #[test]
    fn no_rule_before_first_start_date() {
        let t = table();
        let err = t
            .rule_for(TrainClass::Express, SeatClass::Reserved, date(2019, 12, 31))
            .unwrap_err();
        assert!(matches!(err, FareError::NoFareRule { .. }));
    }

    #[test]
    fn no_rule_for_other_class() {
        let t = table();
        assert!(
            t.rule_for(TrainClass::Local, SeatClass::Reserved, date(2020, 5, 1))
                .is_err()
        );
    }

    #[test]
    fn rejects_decreasing_fares() {
        let result = FareTable::new(vec![band(100.0, 2000), band(200.0, 1000)], vec![]);
        assert!(matches!(result, Err(FareError::InvalidData { .. })));
    }

    #[test]
    fn rejects_bad_multiplier() {
        let result = FareTable::new(vec![band(100.0, 1000)], vec![rule(date(2020, 1, 1), 0.0)]);
        assert!(matches!(result, Err(FareError::InvalidData { .. })));

        let result = FareTable::new(vec![band(100.0, 1000)], vec![rule(date(2020, 1, 1), f64::NAN)]);
        assert!(matches!(result, Err(FareError::InvalidData { .. })));
    }
}
