//! Joins enriched history back to the retained listings
//!
//! Produces one summary row per VIN that has both a retained listing and a
//! history. Prices are restricted to strictly positive values; first-seen and
//! last-seen dates come from the earliest and latest records.

use crate::harvest::dedupe::DedupedListings;
use crate::harvest::outcome::{SkipReason, SkippedUnit};
use crate::harvest::progress::{ProgressReporter, Stage};
use crate::model::{HistoryRecord, Listing, SummaryRow, VehicleHistory};
use chrono::{DateTime, NaiveDate};
use serde_json::Number;

/// Summary rows plus the VINs that could not be summarized
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub rows: Vec<SummaryRow>,
    pub skipped: Vec<SkippedUnit>,
}

/// Builds summary rows for every history with a retained listing
pub fn summarize(
    deduped: &DedupedListings,
    histories: &[VehicleHistory],
    reporter: &ProgressReporter,
) -> Aggregation {
    reporter.stage_started(Stage::Aggregate, histories.len());

    let mut aggregation = Aggregation::default();

    for vehicle in histories {
        match deduped.listing(&vehicle.vin) {
            Some(listing) => aggregation.rows.push(summarize_vehicle(listing, vehicle)),
            None => {
                reporter.summary_skipped(&vehicle.vin, &SkipReason::MissingListing);
                aggregation
                    .skipped
                    .push(SkippedUnit::new(vehicle.vin.clone(), SkipReason::MissingListing));
            }
        }
    }

    reporter.stage_finished(
        Stage::Aggregate,
        aggregation.rows.len(),
        aggregation.skipped.len(),
    );

    aggregation
}

/// Derives the summary row for one vehicle
pub fn summarize_vehicle(listing: &Listing, vehicle: &VehicleHistory) -> SummaryRow {
    let build = listing.build.as_ref();
    let (lowest_price, highest_price) = price_extremes(&vehicle.history);

    SummaryRow {
        vin: vehicle.vin.clone(),
        make: build.and_then(|b| b.make.clone()),
        model: build.and_then(|b| b.model.clone()),
        year: build.and_then(|b| b.year),
        trim: build.and_then(|b| b.trim.clone()),
        current_price: listing.price.clone(),
        current_miles: listing.miles.clone(),
        first_seen: vehicle
            .earliest()
            .and_then(HistoryRecord::first_seen_epoch)
            .and_then(epoch_to_date),
        last_seen: vehicle
            .latest()
            .and_then(HistoryRecord::last_seen_epoch)
            .and_then(epoch_to_date),
        history_count: vehicle.history.len(),
        lowest_price,
        highest_price,
    }
}

/// Lowest and highest strictly positive prices, as reported
pub fn price_extremes(records: &[HistoryRecord]) -> (Option<Number>, Option<Number>) {
    let mut lowest: Option<(f64, &Number)> = None;
    let mut highest: Option<(f64, &Number)> = None;

    for record in records {
        let (Some(value), Some(number)) = (record.positive_price(), record.price.as_ref()) else {
            continue;
        };

        if lowest.map_or(true, |(v, _)| value < v) {
            lowest = Some((value, number));
        }
        if highest.map_or(true, |(v, _)| value > v) {
            highest = Some((value, number));
        }
    }

    (
        lowest.map(|(_, n)| n.clone()),
        highest.map(|(_, n)| n.clone()),
    )
}

/// Converts epoch seconds to a UTC calendar date
pub fn epoch_to_date(seconds: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}
