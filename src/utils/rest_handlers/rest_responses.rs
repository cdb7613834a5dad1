use crate::utils::errors::export_errors::{ErrorKind, ExportError};
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub const EMPTY_RESULT_INFO: &str = "Query succeeded, but the result is empty";

// Success body of POST /export
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExportResponse {
    File { download_url: String, time: String },
    Empty { info: String },
}

// Error body shared by every route
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ExportError> for ErrorResponse {
    fn from(error: &ExportError) -> Self {
        Self {
            error: error.client_message(),
        }
    }
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        match self.kind() {
            ErrorKind::Internal => tracing::error!(error = %self, "request failed"),
            ErrorKind::Validation | ErrorKind::Query | ErrorKind::NotFound => {
                tracing::warn!(error = %self, "request rejected")
            }
        }
        let status = self.http_status();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
