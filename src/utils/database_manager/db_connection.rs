use super::cell_value::{CellValue, extract_mysql_value, extract_sqlite_value};
use super::result_set::ResultSet;
use crate::utils::config::app_config::{DbConfig, DbDriver};
use crate::utils::errors::db_errors::{DbError, ErrCtx};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Column, ConnectOptions, Connection, Row};
use std::str::FromStr;

/// A single connection opened for one export request and closed right after.
pub enum DbConnection {
    MySql(MySqlConnection),
    Sqlite(SqliteConnection),
}

impl DbConnection {
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        match config.driver {
            DbDriver::MySql => {
                let mut options = MySqlConnectOptions::new()
                    .host(&config.host)
                    .port(config.port)
                    .username(&config.user);
                if !config.password.is_empty() {
                    options = options.password(&config.password);
                }
                if !config.database.is_empty() {
                    options = options.database(&config.database);
                }

                let conn = options
                    .connect()
                    .await
                    .map_err(DbError::Connect)
                    .ctx("DbConnection::connect:mysql")?;
                Ok(Self::MySql(conn))
            }
            DbDriver::Sqlite => {
                if config.database.is_empty() {
                    return Err(DbError::Config(
                        "sqlite driver needs DB_NAME to point at a database file".to_string(),
                    ));
                }
                let options = if config.database == ":memory:" {
                    SqliteConnectOptions::from_str("sqlite::memory:")
                        .map_err(DbError::Connect)
                        .ctx("DbConnection::connect:sqlite_options")?
                } else {
                    SqliteConnectOptions::new()
                        .filename(&config.database)
                        .create_if_missing(false)
                };

                let conn = options
                    .connect()
                    .await
                    .map_err(DbError::Connect)
                    .ctx("DbConnection::connect:sqlite")?;
                Ok(Self::Sqlite(conn))
            }
        }
    }

    /// Runs `sql` verbatim and pulls every row in one go.
    pub async fn fetch_result_set(&mut self, sql: &str) -> Result<ResultSet, DbError> {
        match self {
            Self::MySql(conn) => {
                let rows = sqlx::query(sql)
                    .persistent(false)
                    .fetch_all(&mut *conn)
                    .await
                    .map_err(DbError::from_execution)?;
                Ok(collect_rows(&rows, extract_mysql_value))
            }
            Self::Sqlite(conn) => {
                let rows = sqlx::query(sql)
                    .persistent(false)
                    .fetch_all(&mut *conn)
                    .await
                    .map_err(DbError::from_execution)?;
                Ok(collect_rows(&rows, extract_sqlite_value))
            }
        }
    }

    pub async fn close(self) -> Result<(), DbError> {
        let closed = match self {
            Self::MySql(conn) => conn.close().await,
            Self::Sqlite(conn) => conn.close().await,
        };
        closed.map_err(DbError::Execution)
    }
}

fn collect_rows<R: Row>(rows: &[R], extract: fn(&R, usize) -> CellValue) -> ResultSet {
    let columns: Vec<String> = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let data = rows
        .iter()
        .map(|row| (0..columns.len()).map(|idx| extract(row, idx)).collect())
        .collect();

    ResultSet {
        columns,
        rows: data,
    }
}

/// Opens a connection, runs the query, and closes the connection whether the
/// query succeeded or not.
pub async fn run_query(config: &DbConfig, sql: &str) -> Result<ResultSet, DbError> {
    let mut conn = DbConnection::connect(config).await?;
    let result = conn.fetch_result_set(sql).await;

    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "closing database connection failed");
    }

    result.ctx("run_query")
}
