use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown database driver '{0}', expected 'mysql' or 'sqlite'")]
    UnknownDriver(String),

    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}
