pub mod api_docs_handler;
pub mod download_handler;
pub mod export_handler;
pub mod rest_responses;
