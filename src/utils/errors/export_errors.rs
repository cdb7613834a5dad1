use crate::utils::errors::db_errors::DbError;
use crate::utils::errors::xlsx_export_errors::XlsxExportError;
use axum::http::StatusCode;
use std::io;
use thiserror::Error;

/// Closed set of failure classes a client can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Query,
    Internal,
    NotFound,
}

impl ErrorKind {
    pub fn http_status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Query => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Xlsx(#[from] XlsxExportError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    TaskJoin(String),

    #[error("File not found: {0}")]
    NotFound(String),

    // Function context (preserves typed inner error)
    #[error("{func}: {source}")]
    Context {
        func: &'static str,
        #[source]
        source: Box<ExportError>,
    },
}

impl ExportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::Validation(_) => ErrorKind::Validation,
            ExportError::Db(e) if e.is_query_error() => ErrorKind::Query,
            ExportError::Db(_) => ErrorKind::Internal,
            ExportError::Xlsx(_) => ErrorKind::Internal,
            ExportError::Io(_) => ErrorKind::Internal,
            ExportError::TaskJoin(_) => ErrorKind::Internal,
            ExportError::NotFound(_) => ErrorKind::NotFound,
            ExportError::Context { source, .. } => source.kind(),
        }
    }

    pub fn http_status(&self) -> StatusCode {
        self.kind().http_status()
    }

    /// Message returned to the caller. Function-name context stays in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ExportError::Context { source, .. } => source.client_message(),
            ExportError::Db(e) => e.root().to_string(),
            ExportError::Xlsx(e) => e.root().to_string(),
            other => other.to_string(),
        }
    }
}

pub trait ErrCtx<T> {
    fn ctx(self, func: &'static str) -> Result<T, ExportError>;
}

impl<T, E> ErrCtx<T> for Result<T, E>
where
    E: Into<ExportError>,
{
    fn ctx(self, func: &'static str) -> Result<T, ExportError> {
        self.map_err(|e| ExportError::Context {
            func,
            source: Box::new(e.into()),
        })
    }
}
