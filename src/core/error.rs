use thiserror::Error;

#[derive(Error, Debug)]
pub enum StanceError {
    #[error("Not implemented: {0} needs a concrete scoring strategy")]
    NotImplemented(&'static str),

    #[error("Unknown nation: {0}")]
    UnknownNation(String),

    #[error("No movement phase has completed yet")]
    NoMovementPhase,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StanceError>;
