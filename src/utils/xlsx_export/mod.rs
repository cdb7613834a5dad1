pub mod export_file;
pub mod xlsx_writer;
