//! What the connector needs from a store client.
//!
//! The network client itself lives outside this crate. Tests and embedders
//! supply any type implementing these traits.

use std::fmt;

use futures::stream::BoxStream;
use widescan_common::Settings;

use crate::message::{Row, RowSet, SampleRowKey};

pub type RowStream = BoxStream<'static, Result<Row, tonic::Status>>;

/// Source of the key-distribution samples for a table.
#[async_trait::async_trait]
pub trait SampleRowKeys: Send + Sync {
    /// Samples ordered by key ascending, terminated by a sample with an empty
    /// key whose offset is the table size.
    async fn sample_row_keys(&self, table: &TableRef) -> Result<Vec<SampleRowKey>, tonic::Status>;
}

/// Bounded row scans.
#[async_trait::async_trait]
pub trait ReadRows: Send + Sync {
    /// Rows of the set in key order. Dropping the stream cancels the request.
    async fn read_rows(&self, table: &TableRef, rows: RowSet) -> Result<RowStream, tonic::Status>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub project_id: String,
    pub instance_id: String,
    pub table_id: String,
    pub app_profile_id: Option<String>,
}

impl TableRef {
    pub fn new(
        project_id: impl Into<String>,
        instance_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            instance_id: instance_id.into(),
            table_id: table_id.into(),
            app_profile_id: None,
        }
    }

    pub fn with_app_profile(mut self, app_profile_id: impl Into<String>) -> Self {
        self.app_profile_id = Some(app_profile_id.into());
        self
    }
}

impl From<&Settings> for TableRef {
    fn from(settings: &Settings) -> Self {
        Self {
            project_id: settings.project_id.clone(),
            instance_id: settings.instance_id.clone(),
            table_id: settings.table_id.clone(),
            app_profile_id: settings.app_profile_id.clone(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/instances/{}/tables/{}",
            self.project_id, self.instance_id, self.table_id
        )
    }
}
