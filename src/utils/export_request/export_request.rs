use super::export_request_types::{
    ExportOutcome, ExportRequest, ExportRequestBody, ExportedFile, MISSING_QUERY_MSG,
};
use crate::utils::config::app_config::AppConfig;
use crate::utils::database_manager::db_connection::run_query;
use crate::utils::errors::export_errors::{ErrCtx, ExportError};
use crate::utils::xlsx_export::export_file::{final_headers, generate_export_filename};
use crate::utils::xlsx_export::xlsx_writer::write_xlsx;
use std::time::Instant;

impl TryFrom<ExportRequestBody> for ExportRequest {
    type Error = ExportError;

    fn try_from(body: ExportRequestBody) -> Result<Self, Self::Error> {
        let query = match body.query {
            Some(query) if !query.is_empty() => query,
            _ => return Err(ExportError::Validation(MISSING_QUERY_MSG.to_string())),
        };
        Ok(ExportRequest {
            query,
            header: body.header.unwrap_or_default(),
            db_config: body.db_config.unwrap_or_default(),
        })
    }
}

impl ExportRequest {
    /// Parses a raw request body. An empty body counts as a missing query;
    /// anything that is not a JSON object of the expected shape is a validation error.
    pub fn parse(raw: &[u8]) -> Result<Self, ExportError> {
        if raw.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ExportError::Validation(MISSING_QUERY_MSG.to_string()));
        }
        let value: serde_json::Value = serde_json::from_slice(raw)
            .map_err(|e| ExportError::Validation(format!("Invalid JSON body: {}", e)))?;
        if !value.is_object() {
            return Err(ExportError::Validation(MISSING_QUERY_MSG.to_string()));
        }
        let body: ExportRequestBody = serde_json::from_value(value)
            .map_err(|e| ExportError::Validation(format!("Invalid request body: {}", e)))?;
        body.try_into()
    }

    /// Runs the query with the effective connection settings and writes the
    /// rows to a fresh workbook in the export directory.
    pub async fn execute(self, config: &AppConfig) -> Result<ExportOutcome, ExportError> {
        let db_config = config.db.with_overrides(&self.db_config);
        let result_set = run_query(&db_config, &self.query)
            .await
            .ctx("ExportRequest::execute:run_query")?;

        if result_set.is_empty() {
            return Ok(ExportOutcome::Empty);
        }

        let row_count = result_set.row_count();
        let column_count = result_set.column_count();
        let headers = final_headers(&result_set.columns, &self.header);
        let rows = result_set.rows;

        let filename = generate_export_filename();
        let path = config.export_dir().join(&filename);
        let target = path.clone();

        let started = Instant::now();
        tokio::task::spawn_blocking(move || write_xlsx(&target, &headers, &rows))
            .await
            .map_err(|join_err| {
                if join_err.is_panic() {
                    ExportError::TaskJoin(
                        "Internal error: task panicked while writing the workbook".to_string(),
                    )
                } else if join_err.is_cancelled() {
                    ExportError::TaskJoin("Workbook writing task was cancelled".to_string())
                } else {
                    ExportError::TaskJoin(format!("Task execution failed: {}", join_err))
                }
            })? // First ? handles JoinError
            .ctx("ExportRequest::execute:write_xlsx")?;
        let elapsed = started.elapsed();

        Ok(ExportOutcome::Written(ExportedFile {
            filename,
            path,
            row_count,
            column_count,
            elapsed,
        }))
    }
}
