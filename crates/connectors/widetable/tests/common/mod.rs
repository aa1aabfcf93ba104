#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::StreamExt;
use widescan_connector_widetable::{
    ReadRows, Row, RowCell, RowSet, RowStream, SampleRowKey, SampleRowKeys, TableRef,
};

pub const SIZE_768M: i64 = 805306368;

pub const KEYS_1: [&[u8]; 13] = [
    b"beam_key0672496",
    b"beam_key1582279",
    b"beam_key22",
    b"beam_key2874203",
    b"beam_key3475534",
    b"beam_key4440786",
    b"beam_key51",
    b"beam_key56",
    b"beam_key65",
    b"beam_key7389168",
    b"beam_key8105103",
    b"beam_key9007992",
    b"",
];

/// Samples at `keys` with offsets `(i + 1) * 768M`.
pub fn samples(keys: &[&[u8]]) -> Vec<SampleRowKey> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| SampleRowKey::new(key.to_vec(), (i as i64 + 1) * SIZE_768M))
        .collect()
}

pub fn row(key: impl Into<Vec<u8>>) -> Row {
    Row::new(key).with_cell(RowCell {
        family_name: "cf".to_string(),
        qualifier: b"field0".to_vec(),
        timestamp_micros: 0,
        value: b"value".to_vec(),
    })
}

pub fn table() -> TableRef {
    TableRef::new("project_id", "instance_id", "table_id")
}

/// In-memory stand-in for the store client.
#[derive(Default)]
pub struct MemoryTable {
    samples: Vec<SampleRowKey>,
    rows: BTreeMap<Vec<u8>, Row>,
    /// Append an empty-key marker to every scan.
    sentinels: bool,
    /// Ignore the requested end key, like a misbehaving retried request.
    overscan: bool,
    sample_calls: AtomicUsize,
    requests: Mutex<Vec<RowSet>>,
}

impl MemoryTable {
    pub fn new(samples: Vec<SampleRowKey>) -> Self {
        Self { samples, ..Default::default() }
    }

    pub fn with_rows<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Vec<u8>>,
    {
        for key in keys {
            let key = key.into();
            self.rows.insert(key.clone(), row(key));
        }
        self
    }

    pub fn with_sentinels(mut self) -> Self {
        self.sentinels = true;
        self
    }

    pub fn with_overscan(mut self) -> Self {
        self.overscan = true;
        self
    }

    pub fn sample_calls(&self) -> usize {
        self.sample_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RowSet> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SampleRowKeys for MemoryTable {
    async fn sample_row_keys(&self, _table: &TableRef) -> Result<Vec<SampleRowKey>, tonic::Status> {
        self.sample_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.samples.clone())
    }
}

#[async_trait::async_trait]
impl ReadRows for MemoryTable {
    async fn read_rows(&self, _table: &TableRef, rows: RowSet) -> Result<RowStream, tonic::Status> {
        self.requests.lock().unwrap().push(rows.clone());

        let mut matching: Vec<Row> = self
            .rows
            .values()
            .filter(|row| {
                if self.overscan {
                    rows.row_ranges.iter().any(|range| row.row_key >= range.start_key_closed)
                } else {
                    rows.contains(&row.row_key)
                }
            })
            .cloned()
            .collect();
        if self.sentinels {
            matching.push(Row::new(Vec::new()));
        }
        Ok(futures::stream::iter(matching.into_iter().map(Ok)).boxed())
    }
}
