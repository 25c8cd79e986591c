#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("{endpoint} returned an unreadable body: {reason}")]
    InvalidBody { endpoint: String, reason: String },

    #[error("Page {page} was still malformed after {attempts} attempts")]
    MalformedPage { page: u32, attempts: u32 },

    #[error("Invalid credential: {0}")]
    Credential(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Chart rendering failed: {0}")]
    Plot(String),

    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),
}

impl From<tempfile::PersistError> for AppError {
    fn from(err: tempfile::PersistError) -> Self {
        AppError::Io(err.error)
    }
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for AppError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        AppError::Plot(err.to_string())
    }
}
