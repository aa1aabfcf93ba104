//! Size estimation and bundle splitting over a snapshot of sampled row keys.

use std::iter::FusedIterator;
use std::sync::Arc;

use widescan_common::key::display_key;
use widescan_common::{Error, Result};

use crate::message::SampleRowKey;

/// A contiguous key range `[start_position, stop_position)` scanned as one
/// unit of parallel work. An empty stop means the end of the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bundle {
    pub start_position: Vec<u8>,
    pub stop_position: Vec<u8>,
}

impl Bundle {
    pub fn new(start_position: impl Into<Vec<u8>>, stop_position: impl Into<Vec<u8>>) -> Self {
        Self { start_position: start_position.into(), stop_position: stop_position.into() }
    }

    pub fn whole_table() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// A bundle between two identical sample keys. It holds no rows.
    pub fn is_empty(&self) -> bool {
        !self.stop_position.is_empty() && self.start_position == self.stop_position
    }
}

/// Immutable list of samples fetched once and shared by size estimation and
/// splitting.
#[derive(Debug, Clone, Default)]
pub struct SampleSnapshot {
    samples: Arc<[SampleRowKey]>,
}

impl SampleSnapshot {
    pub fn new(samples: Vec<SampleRowKey>) -> Self {
        Self { samples: samples.into() }
    }

    pub fn samples(&self) -> &[SampleRowKey] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Estimated table size in bytes: the offset of the last sample, or zero
    /// when nothing has been sampled.
    pub fn estimate_size(&self) -> u64 {
        self.samples
            .last()
            .map(|sample| u64::try_from(sample.offset_bytes).unwrap_or(0))
            .unwrap_or(0)
    }

    /// One bundle per adjacent pair of samples.
    ///
    /// The first bundle starts at the beginning of the table rather than at
    /// the first sample key, so the bundles cover every key exactly once. A
    /// lone terminal sample yields a single whole-table bundle and an empty
    /// snapshot yields none. Identical adjacent keys yield an empty bundle,
    /// which is still emitted.
    pub fn split(&self) -> BundleSplits<'_> {
        BundleSplits { samples: &self.samples, next: 0, done: false }
    }
}

impl FromIterator<SampleRowKey> for SampleSnapshot {
    fn from_iter<I: IntoIterator<Item = SampleRowKey>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Lazy sequence of bundles over a [`SampleSnapshot`].
///
/// Ordering violations are reported at the pair where they are found, after
/// which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct BundleSplits<'a> {
    samples: &'a [SampleRowKey],
    next: usize,
    done: bool,
}

impl BundleSplits<'_> {
    fn fail(&mut self, err: Error) -> Option<Result<Bundle>> {
        self.done = true;
        Some(Err(err))
    }
}

impl Iterator for BundleSplits<'_> {
    type Item = Result<Bundle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let [only] = self.samples {
            self.done = true;
            if let Err(err) = check_first(only) {
                return self.fail(err);
            }
            if !only.is_terminal() {
                return self.fail(Error::malformed(0, "missing terminal empty key"));
            }
            return Some(Ok(Bundle::whole_table()));
        }

        let i = self.next;
        if i + 1 >= self.samples.len() {
            self.done = true;
            return None;
        }
        self.next += 1;

        if i == 0 {
            if let Err(err) = check_first(&self.samples[0]) {
                return self.fail(err);
            }
        }
        if let Err(err) = check_pair(self.samples, i) {
            return self.fail(err);
        }

        let start = if i == 0 { Vec::new() } else { self.samples[i].row_key.clone() };
        Some(Ok(Bundle::new(start, self.samples[i + 1].row_key.clone())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = match self.samples.len() {
            0 => 0,
            1 => 1,
            n => n - 1 - self.next,
        };
        (0, Some(remaining))
    }
}

impl FusedIterator for BundleSplits<'_> {}

fn check_first(sample: &SampleRowKey) -> Result<()> {
    if sample.offset_bytes < 0 {
        return Err(Error::malformed(0, format!("negative offset {}", sample.offset_bytes)));
    }
    Ok(())
}

/// Validates the pair `(samples[i], samples[i + 1])`.
fn check_pair(samples: &[SampleRowKey], i: usize) -> Result<()> {
    let (current, next) = (&samples[i], &samples[i + 1]);
    let next_is_last = i + 2 == samples.len();

    if current.is_terminal() {
        return Err(Error::malformed(i, "empty key before the end of the table"));
    }
    if next.offset_bytes < current.offset_bytes {
        return Err(Error::malformed(
            i + 1,
            format!("offset {} decreases from {}", next.offset_bytes, current.offset_bytes),
        ));
    }
    if next.is_terminal() {
        if !next_is_last {
            return Err(Error::malformed(i + 1, "empty key before the end of the table"));
        }
        return Ok(());
    }
    if next.row_key < current.row_key {
        return Err(Error::malformed(
            i + 1,
            format!(
                "key {} sorts before previous key {}",
                display_key(&next.row_key),
                display_key(&current.row_key)
            ),
        ));
    }
    if next_is_last {
        return Err(Error::malformed(i + 1, "missing terminal empty key"));
    }
    Ok(())
}
