use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid trip: {0}")]
    InvalidTrip(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EcoError {
    /// Errors caused by what the caller handed us rather than by the environment.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EcoError::InvalidTrip(_) | EcoError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, EcoError>;
