pub mod export_request;
pub mod export_request_types;
