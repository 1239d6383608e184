//! Read-side rollups for the dashboard and statistics pages.
//!
//! Everything here is computed on demand from a [`Snapshot`] of the stored
//! collections; nothing is cached or written back.

mod aggregator;
mod report;

pub use aggregator::{Aggregator, Snapshot, LOW_STOCK_THRESHOLD};
pub use report::*;
