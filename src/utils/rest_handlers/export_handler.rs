use crate::utils::appstate::appstate::SharedState;
use crate::utils::config::app_config::AppConfig;
use crate::utils::errors::export_errors::ExportError;
use crate::utils::export_request::export_request_types::{ExportOutcome, ExportRequest};
use crate::utils::rest_handlers::rest_responses::{EMPTY_RESULT_INFO, ExportResponse};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
};

/// `POST /export`: run the query, write the workbook, answer with its download link.
pub async fn export_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ExportResponse>, ExportError> {
    let request = ExportRequest::parse(&body)?;
    tracing::info!(%request, "export requested");

    match request.execute(&state.config).await? {
        ExportOutcome::Empty => {
            tracing::info!("query returned no rows, nothing written");
            Ok(Json(ExportResponse::Empty {
                info: EMPTY_RESULT_INFO.to_string(),
            }))
        }
        ExportOutcome::Written(file) => {
            tracing::info!(
                filename = %file.filename,
                rows = file.row_count,
                columns = file.column_count,
                elapsed_ms = file.elapsed.as_millis() as u64,
                "export written"
            );
            Ok(Json(ExportResponse::File {
                download_url: format!(
                    "{}/download/{}",
                    download_base_url(&state.config, &headers),
                    file.filename
                ),
                time: format!("Completed in {:.2} seconds", file.elapsed.as_secs_f64()),
            }))
        }
    }
}

/// Root the download link hangs off: the configured public URL if any,
/// otherwise the scheme and host the client used to reach us.
pub fn download_base_url(config: &AppConfig, headers: &HeaderMap) -> String {
    if let Some(base) = &config.public_base_url {
        return base.clone();
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "http".to_string());

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| config.bind_addr.to_string());

    format!("{}://{}", scheme, host)
}
