use tracing::debug;
use widescan_common::key::{display_key, display_stop};
use widescan_common::{Error, Result};

use crate::fraction::{fraction_to_key, key_to_fraction};
use crate::sample::Bundle;

/// Cursor over one bundle's key range `[start, stop)`.
///
/// Keys are compared lexicographically; the empty key is the least key, and
/// an empty stop means the range runs to the end of the table. A tracker is
/// owned by the single scan reading its bundle and is never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTracker {
    start: Vec<u8>,
    stop: Vec<u8>,
    last_claimed: Option<Vec<u8>>,
}

impl RangeTracker {
    pub fn new(start: impl Into<Vec<u8>>, stop: impl Into<Vec<u8>>) -> Result<Self> {
        let (start, stop) = (start.into(), stop.into());
        if !stop.is_empty() && start > stop {
            return Err(Error::InvalidRange { start, stop });
        }
        Ok(Self { start, stop, last_claimed: None })
    }

    pub fn for_bundle(bundle: &Bundle) -> Result<Self> {
        Self::new(bundle.start_position.clone(), bundle.stop_position.clone())
    }

    pub fn start_position(&self) -> &[u8] {
        &self.start
    }

    pub fn stop_position(&self) -> &[u8] {
        &self.stop
    }

    pub fn last_claimed(&self) -> Option<&[u8]> {
        self.last_claimed.as_deref()
    }

    /// The bundle this tracker currently covers; shrinks after a split.
    pub fn bundle(&self) -> Bundle {
        Bundle::new(self.start.clone(), self.stop.clone())
    }

    pub fn contains(&self, position: &[u8]) -> bool {
        position >= self.start.as_slice() && (self.stop.is_empty() || position < self.stop.as_slice())
    }

    /// Claims `position` for the caller.
    ///
    /// Succeeds only for a non-empty key inside the range that sorts after
    /// every key claimed before it. A `false` result tells the reader to stop.
    pub fn try_claim(&mut self, position: &[u8]) -> bool {
        if position.is_empty() || !self.contains(position) {
            return false;
        }
        if let Some(last) = &self.last_claimed {
            if position <= last.as_slice() {
                return false;
            }
        }
        self.last_claimed = Some(position.to_vec());
        true
    }

    /// Share of the range up to the last claimed key.
    pub fn fraction_consumed(&self) -> f64 {
        match &self.last_claimed {
            Some(last) => key_to_fraction(last, &self.start, &self.stop),
            None => 0.0,
        }
    }

    pub fn position_at_fraction(&self, fraction: f64) -> Result<Vec<u8>> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::InvalidFraction(fraction));
        }
        Ok(fraction_to_key(fraction, &self.start, &self.stop))
    }

    /// Gives away `[position, stop)` by moving the stop back to `position`.
    ///
    /// Returns the split position and the fraction of the original range it
    /// sits at, or `None` when the position is not strictly between the last
    /// claimed key (or the start) and the stop.
    pub fn try_split(&mut self, position: &[u8]) -> Option<(Vec<u8>, f64)> {
        if position.is_empty() || position <= self.start.as_slice() {
            return None;
        }
        if !self.stop.is_empty() && position >= self.stop.as_slice() {
            return None;
        }
        if let Some(last) = &self.last_claimed {
            if position <= last.as_slice() {
                return None;
            }
        }

        let fraction = key_to_fraction(position, &self.start, &self.stop);
        debug!(
            split = %display_key(position),
            old_stop = %display_stop(&self.stop),
            fraction,
            "split range tracker"
        );
        self.stop = position.to_vec();
        Some((self.stop.clone(), fraction))
    }

    pub fn split_at_fraction(&mut self, fraction: f64) -> Result<Option<(Vec<u8>, f64)>> {
        let position = self.position_at_fraction(fraction)?;
        Ok(self.try_split(&position))
    }
}
