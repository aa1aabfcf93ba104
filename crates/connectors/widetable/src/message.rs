//! Messages exchanged with the store client.
//!
//! These mirror the store's protobuf messages so a gRPC client can hand its
//! responses over without conversion.

/// One sampled row key and the approximate number of bytes stored up to it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SampleRowKey {
    #[prost(bytes = "vec", tag = "1")]
    pub row_key: Vec<u8>,
    #[prost(int64, tag = "2")]
    pub offset_bytes: i64,
}

impl SampleRowKey {
    pub fn new(row_key: impl Into<Vec<u8>>, offset_bytes: i64) -> Self {
        Self { row_key: row_key.into(), offset_bytes }
    }

    /// The sample marking the end of the table.
    pub fn is_terminal(&self) -> bool {
        self.row_key.is_empty()
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RowCell {
    #[prost(string, tag = "1")]
    pub family_name: String,
    #[prost(bytes = "vec", tag = "2")]
    pub qualifier: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub timestamp_micros: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub value: Vec<u8>,
}

/// A row as streamed back by `read_rows`. An empty key is a boundary marker.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Row {
    #[prost(bytes = "vec", tag = "1")]
    pub row_key: Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub cells: Vec<RowCell>,
}

impl Row {
    pub fn new(row_key: impl Into<Vec<u8>>) -> Self {
        Self { row_key: row_key.into(), cells: Vec::new() }
    }

    pub fn with_cell(mut self, cell: RowCell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn is_sentinel(&self) -> bool {
        self.row_key.is_empty()
    }
}

/// Half-open key range `[start_key_closed, end_key_open)`. An empty end key
/// leaves the range unbounded.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct RowRange {
    #[prost(bytes = "vec", tag = "1")]
    pub start_key_closed: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub end_key_open: Vec<u8>,
}

impl RowRange {
    pub fn new(start: impl Into<Vec<u8>>, end: impl Into<Vec<u8>>) -> Self {
        Self { start_key_closed: start.into(), end_key_open: end.into() }
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start_key_closed.as_slice()
            && (self.end_key_open.is_empty() || key < self.end_key_open.as_slice())
    }
}

/// The scan target of a `read_rows` call.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RowSet {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub row_keys: Vec<Vec<u8>>,
    #[prost(message, repeated, tag = "2")]
    pub row_ranges: Vec<RowRange>,
}

impl RowSet {
    pub fn from_range(range: RowRange) -> Self {
        Self { row_keys: Vec::new(), row_ranges: vec![range] }
    }

    pub fn add_row_key(&mut self, key: impl Into<Vec<u8>>) {
        self.row_keys.push(key.into());
    }

    pub fn add_row_range(&mut self, range: RowRange) {
        self.row_ranges.push(range);
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty() && self.row_ranges.is_empty()
    }

    /// True when the key is one of the listed keys or falls in any range.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.row_keys.iter().any(|k| k.as_slice() == key)
            || self.row_ranges.iter().any(|range| range.contains(key))
    }
}
