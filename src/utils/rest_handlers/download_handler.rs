use crate::utils::appstate::appstate::SharedState;
use crate::utils::errors::export_errors::{ErrCtx, ExportError};
use crate::utils::xlsx_export::export_file::{content_type_for, is_safe_filename};
use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use tokio_util::io::ReaderStream;

/// `GET /download/{filename}`: stream a generated file back as an attachment.
pub async fn download_handler(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<Response, ExportError> {
    // Never touch the filesystem for names that could leave the export directory.
    if !is_safe_filename(&filename) {
        return Err(ExportError::NotFound(filename));
    }

    let path = state.config.export_dir().join(&filename);
    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(ExportError::NotFound(filename)),
        Err(e) => return Err(e).ctx("download_handler:open"),
    };
    let metadata = file.metadata().await.ctx("download_handler:metadata")?;
    if !metadata.is_file() {
        return Err(ExportError::NotFound(filename));
    }

    tracing::info!(%filename, size = metadata.len(), "serving download");

    let body = Body::from_stream(ReaderStream::new(file));
    let headers = [
        (header::CONTENT_TYPE, content_type_for(&filename).to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
        (header::CONTENT_LENGTH, metadata.len().to_string()),
    ];
    Ok((headers, body).into_response())
}
