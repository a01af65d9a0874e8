use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid spectrum: {0}")]
    InvalidSpectrum(String),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Check the backward mixture probability, which must lie strictly in (0, 1).
pub fn check_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(SourceError::InvalidParameter(format!(
            "alpha must lie strictly between 0 and 1, got {}",
            alpha
        )))
    }
}
