use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropRiskError {
    #[error("Model is not fitted yet - call fit() before predicting")]
    NotFitted,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown district: {0}")]
    UnknownDistrict(String),

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CropRiskError>;
