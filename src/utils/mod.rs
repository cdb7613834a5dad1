pub mod appstate;
pub mod config;
pub mod database_manager;
pub mod errors;
pub mod export_request;
pub mod logging;
pub mod rest_handlers;
pub mod xlsx_export;

#[cfg(test)]
pub(crate) mod test_support;
