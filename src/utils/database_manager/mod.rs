pub mod cell_value;
pub mod db_connection;
pub mod result_set;
