use super::db_errors::{DbError, ErrCtx as DbErrCtx};
use super::export_errors::{ErrCtx, ErrorKind, ExportError};
use super::xlsx_export_errors::{ErrCtx as XlsxErrCtx, XlsxExportError};
use axum::http::StatusCode;

#[test]
fn error_kinds_map_to_fixed_statuses() {
    assert_eq!(ErrorKind::Validation.http_status(), StatusCode::BAD_REQUEST);
    assert_eq!(ErrorKind::Query.http_status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        ErrorKind::Internal.http_status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(ErrorKind::NotFound.http_status(), StatusCode::NOT_FOUND);
}

#[test]
fn non_database_execution_failure_is_internal() {
    let db_error = DbError::from_execution(sqlx::Error::Protocol("bad packet".to_string()));
    assert!(!db_error.is_query_error());

    let error = ExportError::from(db_error);
    assert_eq!(error.kind(), ErrorKind::Internal);
    assert!(error.client_message().contains("bad packet"));
}

#[test]
fn connect_failure_is_internal() {
    let error = ExportError::from(DbError::Connect(sqlx::Error::PoolTimedOut));
    assert_eq!(error.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error.client_message().starts_with("database connection failed"));
}

#[test]
fn context_keeps_kind_and_hides_function_name_from_client() {
    let result: Result<(), ExportError> =
        Err(ExportError::Validation("Missing 'query' in request body".to_string()));
    let error = ErrCtx::ctx(result, "export_handler").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(error.client_message(), "Missing 'query' in request body");
    assert!(error.to_string().starts_with("export_handler: "));
}

#[test]
fn db_context_chain_is_stripped_from_client_message() {
    let result: Result<(), DbError> = Err(DbError::Config("empty database path".to_string()));
    let error = ExportError::from(DbErrCtx::ctx(result, "connect").unwrap_err());

    assert_eq!(error.kind(), ErrorKind::Internal);
    assert_eq!(
        error.client_message(),
        "invalid connection config: empty database path"
    );
}

#[test]
fn not_found_names_the_file() {
    let error = ExportError::NotFound("abc.xlsx".to_string());
    assert_eq!(error.http_status(), StatusCode::NOT_FOUND);
    assert_eq!(error.client_message(), "File not found: abc.xlsx");
}

#[test]
fn writer_context_is_hidden_from_client() {
    let result: Result<(), XlsxExportError> = Err(XlsxExportError::TooManyRows {
        count: 1_048_577,
        max: 1_048_576,
    });
    let writer_error = XlsxErrCtx::ctx(result, "write_xlsx:cell").unwrap_err();
    let expected = writer_error.root().to_string();

    let error = ExportError::from(writer_error);
    assert_eq!(error.kind(), ErrorKind::Internal);
    assert_eq!(error.client_message(), expected);
    assert!(!error.client_message().contains("write_xlsx"));
    assert!(error.to_string().contains("write_xlsx"));
}
