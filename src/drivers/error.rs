use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("the file '{}' was not found", path.display())]
    NotFound { path: PathBuf },
    #[error("malformed capture data at line {line}: {message}")]
    Parse { line: u64, message: String },
    #[error("failed to read capture data: {0}")]
    Io(#[from] std::io::Error),
    #[error("sample rate must be a positive number of hertz, got {0}")]
    InvalidSampleRate(f64),
    #[error("channel count mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
impl From<csv::Error> for CaptureError {
    fn from(value: csv::Error) -> Self {
        let line = value.position().map(|p| p.line()).unwrap_or(0);
        let message = value.to_string();
        match value.into_kind() {
            csv::ErrorKind::Io(err) => CaptureError::Io(err),
            _ => CaptureError::Parse { line, message },
        }
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for CaptureError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        CaptureError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for CaptureError {
    fn from(value: image::ImageError) -> Self {
        CaptureError::Plot(value.to_string())
    }
}
