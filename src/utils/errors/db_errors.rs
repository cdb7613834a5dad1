use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    // Opening the per-request connection failed (host unreachable, bad credentials, ...)
    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    // The database itself rejected the statement (syntax, unknown table, ...)
    #[error("SQL query error: {0}")]
    Query(#[source] sqlx::Error),

    // Anything else that broke while the statement was running (io, protocol, decode)
    #[error("query execution failed: {0}")]
    Execution(#[source] sqlx::Error),

    #[error("invalid connection config: {0}")]
    Config(String),

    // Function context (preserves typed inner error)
    #[error("{func}: {source}")]
    Context {
        func: &'static str,
        #[source]
        source: Box<DbError>,
    },
}

impl DbError {
    /// Splits an execution failure into "the database said no" and everything else.
    pub fn from_execution(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(_) => DbError::Query(error),
            other => DbError::Execution(other),
        }
    }

    pub fn is_query_error(&self) -> bool {
        match self {
            DbError::Query(_) => true,
            DbError::Context { source, .. } => source.is_query_error(),
            _ => false,
        }
    }

    /// Innermost error, without the function-name context chain.
    pub fn root(&self) -> &DbError {
        match self {
            DbError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

// Add function-name context ergonomically inside the DB layer
pub trait ErrCtx<T> {
    fn ctx(self, func: &'static str) -> Result<T, DbError>;
}

impl<T, E> ErrCtx<T> for Result<T, E>
where
    E: Into<DbError>,
{
    fn ctx(self, func: &'static str) -> Result<T, DbError> {
        self.map_err(|e| DbError::Context {
            func,
            source: Box::new(e.into()),
        })
    }
}
