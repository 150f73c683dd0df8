//! Aggregation of counter lines from Scenargie DCC result logs.
//!
//! A log is scanned once, front to back, by an [`scan::Aggregator`]. Each aggregator classifies
//! lines by a fixed keyword and sums the counters it cares about, producing its result only after
//! the last line has been seen.

pub mod error;
pub mod line;
pub mod message_counts;
pub mod pdr;
pub mod scan;
pub mod stats;

pub use error::ScanError;
pub use message_counts::{MessageCountSummary, MessageCounts};
pub use pdr::{BroadcastPdr, BroadcastPdrSummary, DiscardPdr, DiscardPdrSummary, Pdr};
pub use scan::{Aggregator, Scanned, scan_file, scan_reader};
