use thiserror::Error;

/// Failure writing a rendered deck or its analysis.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report")]
    Write(#[from] std::io::Error),
    #[error("failed to encode analysis as JSON")]
    Encode(#[from] serde_json::Error),
}
