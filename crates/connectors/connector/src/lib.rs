//! The bounded-source interface an execution framework drives.
//!
//! A connector estimates how much data it holds, cuts its key space into
//! independent splits, and reads one split at a time through a range tracker
//! the reader owns for the duration of the scan.

use futures::stream::BoxStream;
use futures::TryStreamExt;
use widescan_common::Result;

pub type RecordStream<T> = BoxStream<'static, Result<T>>;

/// The core trait for any widescan data source connector.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    /// A unit of parallel work, e.g. a contiguous key range.
    type Split: Send + Sync;
    /// Per-split cursor recording how far a read has progressed.
    type Tracker: Send;
    type Record: Send + 'static;

    /// Estimated total size of the source in bytes.
    async fn estimate_size(&self) -> Result<u64>;

    /// Partition the source into splits that together cover it exactly once.
    async fn get_splits(&self) -> Result<Vec<Self::Split>>;

    fn range_tracker(&self, split: &Self::Split) -> Result<Self::Tracker>;

    /// Given a tracker, return a stream of the records it claims.
    async fn read_split(&self, tracker: Self::Tracker) -> Result<RecordStream<Self::Record>>;
}

/// Reads every split in order and collects the records.
///
/// Splits are read one after another; running them in parallel is the
/// caller's business.
pub async fn read_all<C>(connector: &C) -> Result<Vec<C::Record>>
where
    C: Connector + ?Sized,
{
    let mut records = Vec::new();
    for split in connector.get_splits().await? {
        let tracker = connector.range_tracker(&split)?;
        let stream = connector.read_split(tracker).await?;
        let mut split_records: Vec<C::Record> = stream.try_collect().await?;
        records.append(&mut split_records);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::ops::Range;
    use widescan_common::Error;

    /// Serves a fixed list of numbers in splits of `chunk` items.
    struct VecConnector {
        values: Vec<u64>,
        chunk: usize,
    }

    #[async_trait::async_trait]
    impl Connector for VecConnector {
        type Split = Range<usize>;
        type Tracker = Range<usize>;
        type Record = u64;

        async fn estimate_size(&self) -> Result<u64> {
            Ok((self.values.len() * std::mem::size_of::<u64>()) as u64)
        }

        async fn get_splits(&self) -> Result<Vec<Range<usize>>> {
            Ok((0..self.values.len())
                .step_by(self.chunk)
                .map(|start| start..(start + self.chunk).min(self.values.len()))
                .collect())
        }

        fn range_tracker(&self, split: &Range<usize>) -> Result<Range<usize>> {
            if split.end > self.values.len() {
                return Err(Error::InvalidRange {
                    start: split.start.to_be_bytes().to_vec(),
                    stop: split.end.to_be_bytes().to_vec(),
                });
            }
            Ok(split.clone())
        }

        async fn read_split(&self, tracker: Range<usize>) -> Result<RecordStream<u64>> {
            let values = self.values[tracker].to_vec();
            Ok(futures::stream::iter(values.into_iter().map(Ok)).boxed())
        }
    }

    #[tokio::test]
    async fn test_read_all_visits_every_split() {
        let connector = VecConnector { values: (0..10).collect(), chunk: 3 };

        assert_eq!(connector.get_splits().await.unwrap().len(), 4);
        assert_eq!(connector.estimate_size().await.unwrap(), 80);

        let records = read_all(&connector).await.unwrap();
        assert_eq!(records, (0..10).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_read_all_empty_source() {
        let connector = VecConnector { values: Vec::new(), chunk: 3 };
        assert!(read_all(&connector).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tracker_error_propagates() {
        let connector = VecConnector { values: vec![1, 2], chunk: 1 };
        let result = connector.range_tracker(&(0..5));
        assert!(matches!(result, Err(Error::InvalidRange { .. })));
    }
}
