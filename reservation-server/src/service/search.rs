//! Train search: runs serving a segment, with availability and fares.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;

use crate::availability::{Availability, OccupancyMap, availability_by_bucket};
use crate::domain::{Direction, SeatBucket, Segment, Station, TrainClass, TrainRun};
use crate::fares::FareCalculator;
use crate::route::{resolve_route, serves_segment};
use crate::storage::Storage;

use super::{ReservationError, ReservationService};

/// Search for runs between two named stations on a date.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub date: NaiveDate,
    pub from: String,
    pub to: String,

    /// Restrict to one train class. A class that does not stop at both
    /// stations yields no results.
    pub train_class: Option<TrainClass>,
}

/// One matching run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub run: TrainRun,
    pub departure: String,
    pub arrival: String,
    pub seat_availability: BTreeMap<SeatBucket, Availability>,
    pub seat_fare: BTreeMap<SeatBucket, u32>,
}

impl<S: Storage> ReservationService<S> {
    /// Runs that carry passengers from `query.from` to `query.to`, in
    /// departure order.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ReservationError> {
        let from = self.station(&query.from)?;
        let to = self.station(&query.to)?;
        let direction = Direction::between(from.id, to.id).ok_or_else(|| {
            ReservationError::InvalidSegment(format!("{} is both origin and destination", from.name))
        })?;
        let requested = Segment::new(from.id, to.id, direction)?;

        let mut classes = self.directory.usable_train_classes(from, to);
        if let Some(only) = query.train_class {
            classes.retain(|c| *c == only);
        }
        if classes.is_empty() {
            return Ok(Vec::new());
        }

        let runs = self
            .call(self.storage.list_train_runs(query.date, &classes, direction))
            .await?;

        let mut candidates = Vec::new();
        for run in runs {
            let route = resolve_route(&self.directory, &run)?;
            if serves_segment(&route, from.id, to.id) {
                candidates.push(run);
            }
        }

        let pending: Vec<_> = candidates
            .into_iter()
            .map(|run| self.search_row(run, from, to, requested))
            .collect();
        let rows = try_join_all(pending).await?;

        debug!(
            date = %query.date,
            from = %from.name,
            to = %to.name,
            results = rows.len(),
            "train search"
        );
        Ok(rows)
    }

    async fn search_row(
        &self,
        run: TrainRun,
        from: &Station,
        to: &Station,
        requested: Segment,
    ) -> Result<SearchResult, ReservationError> {
        let seats = self.class_seats(run.train_class).await?;
        let reservations = self
            .call(self.storage.list_reservations_for_run(&run.key()))
            .await?;

        let occupancy = OccupancyMap::build(&self.directory, &run, &reservations)?;
        let seat_availability = availability_by_bucket(&seats, &occupancy, &requested);

        let calculator = FareCalculator::new(&self.directory, &self.fares);
        let seat_fare = SeatBucket::ALL
            .into_iter()
            .map(|bucket| {
                calculator
                    .fare(run.date, from.id, to.id, run.train_class, bucket.seat_class())
                    .map(|fare| (bucket, fare))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(SearchResult {
            departure: from.name.clone(),
            arrival: to.name.clone(),
            run,
            seat_availability,
            seat_fare,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewReservation, SeatPosition, TrainRunKey, UserId};
    use crate::service::test_support::service;
    use crate::storage::StorageWriter;
    use crate::storage::test_support::{date, seat_at};

    fn query(from: &str, to: &str) -> SearchQuery {
        SearchQuery {
            date: date(),
            from: from.to_string(),
            to: to.to_string(),
            train_class: None,
        }
    }

    async fn book(
        service: &ReservationService<crate::storage::MemoryStorage>,
        from: &str,
        to: &str,
        seats: Vec<SeatPosition>,
    ) {
        service
            .storage
            .create_reservation(NewReservation {
                user_id: UserId(1),
                run: TrainRunKey {
                    date: date(),
                    train_class: TrainClass::Express,
                    train_name: "R".to_string(),
                },
                departure: from.to_string(),
                arrival: to.to_string(),
                seats,
                payment_id: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn finds_outbound_run_with_fares() {
        let service = service().await;
        let rows = service.search(&query("A", "C")).await.unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.run.train_name, "R");
        assert_eq!(row.seat_fare[&SeatBucket::Reserved], 1800);
        assert_eq!(row.seat_fare[&SeatBucket::ReservedSmoke], 1800);
        assert_eq!(row.seat_availability[&SeatBucket::Reserved], Availability::Full);
        assert_eq!(row.seat_availability[&SeatBucket::Premium], Availability::SoldOut);
        assert_eq!(row.seat_availability[&SeatBucket::NonReserved], Availability::Full);
    }

    #[tokio::test]
    async fn inbound_search_finds_inbound_run() {
        let service = service().await;
        let rows = service.search(&query("B", "A")).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].run.train_name, "Q");
        assert_eq!(rows[0].seat_fare[&SeatBucket::Reserved], 1200);
    }

    #[tokio::test]
    async fn adjacent_reservations_do_not_reduce_availability() {
        let service = service().await;
        book(&service, "B", "C", (1..=12).map(|r| seat_at(1, r)).collect()).await;

        let first_leg = service.search(&query("A", "B")).await.unwrap();
        assert_eq!(first_leg[0].seat_availability[&SeatBucket::Reserved], Availability::Full);

        let whole = service.search(&query("A", "C")).await.unwrap();
        assert_eq!(whole[0].seat_availability[&SeatBucket::Reserved], Availability::SoldOut);
    }

    #[tokio::test]
    async fn availability_reflects_overlapping_reservations() {
        let service = service().await;
        book(&service, "A", "C", vec![seat_at(1, 1), seat_at(1, 2), seat_at(1, 3)]).await;

        let rows = service.search(&query("B", "C")).await.unwrap();
        assert_eq!(rows[0].seat_availability[&SeatBucket::Reserved], Availability::Limited);
    }

    #[tokio::test]
    async fn class_filter_excluding_all_runs_is_empty() {
        let service = service().await;
        let rows = service
            .search(&SearchQuery {
                train_class: Some(TrainClass::Local),
                ..query("A", "C")
            })
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_station_and_zero_length() {
        let service = service().await;

        let err = service.search(&query("A", "Z")).await.unwrap_err();
        assert_eq!(err, ReservationError::not_found("station", "Z"));

        let err = service.search(&query("B", "B")).await.unwrap_err();
        assert!(matches!(err, ReservationError::InvalidSegment(_)));
    }

    #[tokio::test]
    async fn other_dates_have_no_runs() {
        let service = service().await;
        let rows = service
            .search(&SearchQuery {
                date: date().succ_opt().unwrap(),
                ..query("A", "C")
            })
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
