use std::path::PathBuf;
use crate::drivers::loader::load_capture;
use crate::drivers::{CaptureError, CaptureTable};
/// Anything that can hand over a complete capture table.
pub trait CaptureSource {
    fn load(&mut self) -> Result<CaptureTable, CaptureError>;
    /// Human readable origin, used in logs and reports.
    fn describe(&self) -> String;
}
/// Capture CSV on disk.
pub struct CsvFileSource {
    path: PathBuf,
}
impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
impl CaptureSource for CsvFileSource {
    fn load(&mut self) -> Result<CaptureTable, CaptureError> {
        load_capture(&self.path)
    }
    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
/// In-memory source for tests.
#[cfg(test)]
pub struct ManualSource {
    table: CaptureTable,
}
#[cfg(test)]
impl ManualSource {
    pub fn new(table: CaptureTable) -> Self {
        Self { table }
    }
}
#[cfg(test)]
impl CaptureSource for ManualSource {
    fn load(&mut self) -> Result<CaptureTable, CaptureError> {
        Ok(self.table.clone())
    }
    fn describe(&self) -> String {
        "<memory>".into()
    }
}
