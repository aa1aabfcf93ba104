//! Wide-table connector.
//!
//! Reads a table held in a distributed sorted key-value store as a bounded
//! source. The table's sampled row keys drive planning:
//!
//! - [`SampleSnapshot::estimate_size`] reports the total size,
//! - [`SampleSnapshot::split`] partitions the key space into [`Bundle`]s that
//!   can be scanned independently and in parallel,
//! - [`RangeTracker`] records how far the scan of one bundle has got,
//! - [`WideTableSource::read`] streams the rows of one bundle, dropping the
//!   empty-key boundary markers the store may send.
//!
//! The store client is supplied by the caller through the [`SampleRowKeys`]
//! and [`ReadRows`] traits.

pub mod client;
mod fraction;
pub mod message;
pub mod range_tracker;
pub mod sample;
pub mod scan;
pub mod source;

pub use client::{ReadRows, RowStream, SampleRowKeys, TableRef};
pub use message::{Row, RowCell, RowRange, RowSet, SampleRowKey};
pub use range_tracker::RangeTracker;
pub use sample::{Bundle, BundleSplits, SampleSnapshot};
pub use scan::BundleScan;
pub use source::WideTableSource;
