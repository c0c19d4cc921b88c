use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use ndarray::Array2;
use crate::drivers::{CaptureError, CaptureTable};
/// File the recorder writes next to itself.
pub const DEFAULT_CAPTURE_FILE: &str = "uma8_capture.csv";
/// Opens and parses a capture file written by the recorder.
pub fn load_capture(path: impl AsRef<Path>) -> Result<CaptureTable, CaptureError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => CaptureError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CaptureError::Io(err),
    })?;
    let table = parse_capture(file)?;
    info!(
        "loaded {} channels x {} samples from {}",
        table.num_channels(),
        table.num_samples(),
        path.display()
    );
    Ok(table)
}
/// Parses comma separated capture data: a header row of channel names followed by
/// one row of time-aligned samples per line.
pub fn parse_capture<R: Read>(reader: R) -> Result<CaptureTable, CaptureError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let labels: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    validate_header(&labels)?;
    let mut flat = Vec::new();
    let mut rows = 0usize;
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        for (label, cell) in labels.iter().zip(record.iter()) {
            let value = cell.parse::<f64>().map_err(|_| CaptureError::Parse {
                line,
                message: format!("channel '{label}' has non-numeric sample '{cell}'"),
            })?;
            flat.push(value);
        }
        rows += 1;
    }
    debug!("parsed {rows} rows for {} channels", labels.len());
    let samples =
        Array2::from_shape_vec((rows, labels.len()), flat).map_err(|err| CaptureError::Parse {
            line: 0,
            message: err.to_string(),
        })?;
    CaptureTable::new(labels, samples)
}
fn validate_header(labels: &[String]) -> Result<(), CaptureError> {
    if labels.is_empty() {
        return Err(CaptureError::Parse {
            line: 1,
            message: "missing header row with channel names".into(),
        });
    }
    let mut seen = HashSet::with_capacity(labels.len());
    for (idx, label) in labels.iter().enumerate() {
        if label.is_empty() {
            return Err(CaptureError::Parse {
                line: 1,
                message: format!("column {} has an empty channel name", idx + 1),
            });
        }
        if !seen.insert(label.as_str()) {
            return Err(CaptureError::Parse {
                line: 1,
                message: format!(
                    "channel name '{label}' appears more than once; channel names must be unique"
                ),
            });
        }
    }
    Ok(())
}
