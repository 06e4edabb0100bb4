//! Data model for listings, price history and derived summary rows
//!
//! # Components
//!
//! - `Listing`: one marketplace record for a vehicle at a point in time
//! - `HistoryRecord` / `VehicleHistory`: remote-reported price observations per VIN
//! - `SummaryRow`: the per-VIN join of current listing state and history extremes

mod fields;
mod history;
mod listing;
mod summary;

// Re-export main types
pub use history::{HistoryRecord, VehicleHistory};
pub use listing::{Build, Dealer, Listing, ListingPage};
pub use summary::{SummaryRow, NOT_AVAILABLE, SUMMARY_HEADER};
