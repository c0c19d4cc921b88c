// src/drivers/mod.rs
pub mod analysis;
pub mod error;
pub mod export;
pub mod loader;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod source;
pub mod table;
pub use error::CaptureError;
pub use export::export_analysis;
pub use loader::DEFAULT_CAPTURE_FILE;
pub use pipeline::{AnalysisPipeline, CaptureAnalysis};
pub use report::{write_analysis_hints, write_report};
pub use source::CsvFileSource;
pub use table::{CaptureTable, DEFAULT_SAMPLE_RATE_HZ};
