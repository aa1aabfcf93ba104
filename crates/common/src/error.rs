use thiserror::Error;

use crate::key::{display_last, display_start, display_stop};

/// Unified error type for widescan crates.
///
/// Data-shape problems (bad samples, inverted ranges) and transport problems
/// (a failed store call) are separate variants so callers can tell them apart.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed sample row keys at index {index}: {reason}")]
    MalformedSamples { index: usize, reason: String },

    #[error("failed to fetch sample row keys for {table}")]
    SampleRowKeys {
        table: String,
        #[source]
        source: tonic::Status,
    },

    #[error(
        "read_rows failed for {table} in bundle [{}, {}) after key {}",
        display_start(.start),
        display_stop(.stop),
        display_last(.last_key)
    )]
    ReadRows {
        table: String,
        start: Vec<u8>,
        stop: Vec<u8>,
        last_key: Option<Vec<u8>>,
        #[source]
        source: tonic::Status,
    },

    #[error(
        "invalid key range: start {} is after stop {}",
        display_start(.start),
        display_stop(.stop)
    )]
    InvalidRange { start: Vec<u8>, stop: Vec<u8> },

    #[error("split fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),

    #[error("failed to load configuration")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Error::MalformedSamples { index, reason: reason.into() }
    }

    /// True for failures of a store call rather than of the data it returned.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::SampleRowKeys { .. } | Error::ReadRows { .. })
    }
}
