pub mod app_errors;
pub mod config_errors;
pub mod db_errors;
pub mod export_errors;
pub mod xlsx_export_errors;

#[cfg(test)]
mod export_errors_tests;
