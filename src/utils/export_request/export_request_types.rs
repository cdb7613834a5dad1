use crate::utils::config::app_config::DbConfigOverride;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const MISSING_QUERY_MSG: &str = "Missing 'query' in request body";

/// Body of `POST /export` exactly as it arrives. Every field is optional here;
/// `ExportRequest::parse` enforces what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequestBody {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub header: Option<Vec<String>>,
    #[serde(default)]
    pub db_config: Option<DbConfigOverride>,
}

/// A validated export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub query: String,
    pub header: Vec<String>,
    pub db_config: DbConfigOverride,
}

impl fmt::Display for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "query length: {} header overrides: {} db override: host={} database={}",
            self.query.len(),
            self.header.len(),
            self.db_config.host.as_deref().unwrap_or("-"),
            self.db_config.database.as_deref().unwrap_or("-"),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub path: PathBuf,
    pub row_count: usize,
    pub column_count: usize,
    /// Time spent writing the workbook only.
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The query ran but returned no rows; nothing was written.
    Empty,
    Written(ExportedFile),
}
