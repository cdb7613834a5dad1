use crate::utils::errors::config_errors::ConfigError;
use thiserror::Error;

/// Startup failures of the binary: configuration, export directory, listener.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{func}: {source}")]
    Context {
        func: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

// Add function-name context ergonomically at the app layer
pub trait ErrCtx<T> {
    fn ctx(self, func: &'static str) -> Result<T, AppError>;
}

impl<T, E> ErrCtx<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn ctx(self, func: &'static str) -> Result<T, AppError> {
        self.map_err(|e| AppError::Context {
            func,
            source: Box::new(e.into()),
        })
    }
}
