use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use tracing::{debug, trace, warn};
use widescan_common::key::{display_key, display_start, display_stop};
use widescan_common::{Error, Result};

use crate::client::{RowStream, TableRef};
use crate::message::Row;
use crate::range_tracker::RangeTracker;

/// Rows of one bundle, pulled from a single `read_rows` call.
///
/// Empty-key rows are boundary markers and are skipped. Every other row must
/// be claimed by the tracker before it is yielded; the first refused claim
/// ends the scan and drops the underlying request. A transport error is
/// yielded once, with the bundle bounds attached, and also ends the scan.
pub struct BundleScan {
    table: TableRef,
    rows: Option<RowStream>,
    tracker: RangeTracker,
    emitted: u64,
}

impl BundleScan {
    pub(crate) fn new(table: TableRef, rows: RowStream, tracker: RangeTracker) -> Self {
        Self { table, rows: Some(rows), tracker, emitted: 0 }
    }

    pub fn tracker(&self) -> &RangeTracker {
        &self.tracker
    }

    /// Mutable access for progress-driven splitting between polls.
    pub fn tracker_mut(&mut self) -> &mut RangeTracker {
        &mut self.tracker
    }

    pub fn into_tracker(self) -> RangeTracker {
        self.tracker
    }

    pub fn rows_emitted(&self) -> u64 {
        self.emitted
    }

    /// Stops the scan, releasing the request to the store.
    fn finish(&mut self) {
        if self.rows.take().is_some() {
            trace!(
                table = %self.table,
                start = %display_start(self.tracker.start_position()),
                stop = %display_stop(self.tracker.stop_position()),
                rows = self.emitted,
                "bundle scan finished"
            );
        }
    }
}

impl Stream for BundleScan {
    type Item = Result<Row>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            let Some(rows) = this.rows.as_mut() else {
                return Poll::Ready(None);
            };

            match rows.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => {
                    this.finish();
                    return Poll::Ready(None);
                }
                Poll::Ready(Some(Err(status))) => {
                    warn!(
                        table = %this.table,
                        start = %display_start(this.tracker.start_position()),
                        stop = %display_stop(this.tracker.stop_position()),
                        code = ?status.code(),
                        "read_rows failed"
                    );
                    let err = Error::ReadRows {
                        table: this.table.to_string(),
                        start: this.tracker.start_position().to_vec(),
                        stop: this.tracker.stop_position().to_vec(),
                        last_key: this.tracker.last_claimed().map(<[u8]>::to_vec),
                        source: status,
                    };
                    this.finish();
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(Some(Ok(row))) => {
                    if row.is_sentinel() {
                        continue;
                    }
                    if !this.tracker.try_claim(&row.row_key) {
                        debug!(
                            table = %this.table,
                            key = %display_key(&row.row_key),
                            stop = %display_stop(this.tracker.stop_position()),
                            "row not claimable; ending bundle scan"
                        );
                        this.finish();
                        return Poll::Ready(None);
                    }
                    this.emitted += 1;
                    return Poll::Ready(Some(Ok(row)));
                }
            }
        }
    }
}
