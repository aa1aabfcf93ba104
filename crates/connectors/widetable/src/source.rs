use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, warn};
use widescan_common::key::{display_start, display_stop};
use widescan_common::{Error, Result, Settings};
use widescan_connector::{Connector, RecordStream};

use crate::client::{ReadRows, SampleRowKeys, TableRef};
use crate::message::{Row, RowRange, RowSet};
use crate::range_tracker::RangeTracker;
use crate::sample::{Bundle, SampleSnapshot};
use crate::scan::BundleScan;

/// Bounded source over one wide table.
///
/// Planning (size estimation and splitting) is driven by the table's sampled
/// row keys; reading issues one bounded `read_rows` call per bundle.
pub struct WideTableSource<C> {
    client: Arc<C>,
    table: TableRef,
    row_set: Option<RowSet>,
}

impl<C> Clone for WideTableSource<C> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone(), table: self.table.clone(), row_set: self.row_set.clone() }
    }
}

impl<C> WideTableSource<C>
where
    C: SampleRowKeys + ReadRows,
{
    pub fn new(client: Arc<C>, table: TableRef) -> Self {
        Self { client, table, row_set: None }
    }

    pub fn from_settings(client: Arc<C>, settings: &Settings) -> Self {
        Self::new(client, TableRef::from(settings))
    }

    /// Records a caller-supplied row set. Splitting does not narrow to it:
    /// bundles always partition the whole table.
    pub fn with_row_set(mut self, row_set: RowSet) -> Self {
        self.row_set = Some(row_set);
        self
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    pub fn row_set(&self) -> Option<&RowSet> {
        self.row_set.as_ref()
    }

    /// Fetches the table's samples once. Estimate and split from the returned
    /// snapshot when both are needed.
    pub async fn sample_row_keys(&self) -> Result<SampleSnapshot> {
        let samples = self.client.sample_row_keys(&self.table).await.map_err(|source| {
            warn!(table = %self.table, code = ?source.code(), "sample_row_keys failed");
            Error::SampleRowKeys { table: self.table.to_string(), source }
        })?;
        debug!(table = %self.table, samples = samples.len(), "fetched sample row keys");
        Ok(SampleSnapshot::new(samples))
    }

    pub async fn estimate_size(&self) -> Result<u64> {
        Ok(self.sample_row_keys().await?.estimate_size())
    }

    pub async fn split(&self) -> Result<Vec<Bundle>> {
        let snapshot = self.sample_row_keys().await?;
        self.split_snapshot(&snapshot)
    }

    pub fn split_snapshot(&self, snapshot: &SampleSnapshot) -> Result<Vec<Bundle>> {
        if self.row_set.as_ref().is_some_and(|row_set| !row_set.is_empty()) {
            warn!(
                table = %self.table,
                "row set supplied to source is ignored; splitting covers the whole table"
            );
        }
        let bundles = snapshot.split().collect::<Result<Vec<_>>>()?;
        debug!(
            table = %self.table,
            samples = snapshot.len(),
            bundles = bundles.len(),
            estimated_bytes = snapshot.estimate_size(),
            "split table into bundles"
        );
        Ok(bundles)
    }

    pub fn get_range_tracker(
        &self,
        start_position: impl Into<Vec<u8>>,
        stop_position: impl Into<Vec<u8>>,
    ) -> Result<RangeTracker> {
        RangeTracker::new(start_position, stop_position)
    }

    /// Starts a scan of the tracker's range. Exactly one `read_rows` call is
    /// made; the returned stream owns the tracker.
    pub async fn read(&self, tracker: RangeTracker) -> Result<BundleScan> {
        let range = RowRange::new(tracker.start_position(), tracker.stop_position());
        debug!(
            table = %self.table,
            start = %display_start(&range.start_key_closed),
            stop = %display_stop(&range.end_key_open),
            "starting bundle scan"
        );

        let rows = self
            .client
            .read_rows(&self.table, RowSet::from_range(range))
            .await
            .map_err(|source| {
                warn!(table = %self.table, code = ?source.code(), "read_rows request failed");
                Error::ReadRows {
                    table: self.table.to_string(),
                    start: tracker.start_position().to_vec(),
                    stop: tracker.stop_position().to_vec(),
                    last_key: None,
                    source,
                }
            })?;
        Ok(BundleScan::new(self.table.clone(), rows, tracker))
    }
}

#[async_trait::async_trait]
impl<C> Connector for WideTableSource<C>
where
    C: SampleRowKeys + ReadRows + 'static,
{
    type Split = Bundle;
    type Tracker = RangeTracker;
    type Record = Row;

    async fn estimate_size(&self) -> Result<u64> {
        WideTableSource::estimate_size(self).await
    }

    async fn get_splits(&self) -> Result<Vec<Bundle>> {
        self.split().await
    }

    fn range_tracker(&self, split: &Bundle) -> Result<RangeTracker> {
        RangeTracker::for_bundle(split)
    }

    async fn read_split(&self, tracker: RangeTracker) -> Result<RecordStream<Row>> {
        Ok(self.read(tracker).await?.boxed())
    }
}
