use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// Identifies the wide table a source reads from.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub project_id: String,
    pub instance_id: String,
    pub table_id: String,
    #[serde(default)]
    pub app_profile_id: Option<String>,
}

impl Settings {
    /// Loads settings from the file named by `WIDESCAN_CONFIG_PATH`, layered
    /// with `WIDESCAN__*` environment overrides.
    pub fn new() -> Result<Self> {
        let config_file_path = std::env::var("WIDESCAN_CONFIG_PATH")
            .unwrap_or_else(|_| "config/default.toml".to_string());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&config_file_path).required(true))
            .add_source(config::Environment::with_prefix("WIDESCAN").separator("__"))
            .build()?;
        Ok(s.try_deserialize()?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(true))
            .build()?;
        Ok(s.try_deserialize()?)
    }

    /// Fully qualified table name, as the store addresses it.
    pub fn table_name(&self) -> String {
        format!(
            "projects/{}/instances/{}/tables/{}",
            self.project_id, self.instance_id, self.table_id
        )
    }
}
