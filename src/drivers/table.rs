use ndarray::{Array2, ArrayView1, Axis};
use crate::drivers::CaptureError;
/// Rate the UMA-8 recorder is configured with.
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 48_000.0;
/// In-memory multichannel capture. Rows are samples, columns are channels.
#[derive(Clone, Debug)]
pub struct CaptureTable {
    channel_labels: Vec<String>,
    samples: Array2<f64>, // samples x channels
}
impl CaptureTable {
    pub fn new(channel_labels: Vec<String>, samples: Array2<f64>) -> Result<Self, CaptureError> {
        if samples.ncols() != channel_labels.len() {
            return Err(CaptureError::ChannelMismatch {
                expected: channel_labels.len(),
                actual: samples.ncols(),
            });
        }
        Ok(Self {
            channel_labels,
            samples,
        })
    }
    /// Builds a table from per-channel sample vectors, which must all be the same length.
    #[cfg(test)]
    pub fn from_columns(
        channel_labels: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, CaptureError> {
        if columns.len() != channel_labels.len() {
            return Err(CaptureError::ChannelMismatch {
                expected: channel_labels.len(),
                actual: columns.len(),
            });
        }
        let rows = columns.first().map(|c| c.len()).unwrap_or(0);
        if let Some(ragged) = columns.iter().find(|c| c.len() != rows) {
            return Err(CaptureError::Parse {
                line: 0,
                message: format!(
                    "channels must share one sample clock: found {} and {} samples",
                    rows,
                    ragged.len()
                ),
            });
        }
        let samples = Array2::from_shape_fn((rows, columns.len()), |(row, col)| columns[col][row]);
        Self::new(channel_labels, samples)
    }
    pub fn channel_labels(&self) -> &[String] {
        &self.channel_labels
    }
    pub fn num_channels(&self) -> usize {
        self.samples.ncols()
    }
    pub fn num_samples(&self) -> usize {
        self.samples.nrows()
    }
    pub fn is_empty(&self) -> bool {
        self.num_samples() == 0
    }
    pub fn channel(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.num_channels()).then(|| self.samples.column(index))
    }
    /// Channels in column order, paired with their header label.
    pub fn channels(&self) -> impl Iterator<Item = (&str, ArrayView1<'_, f64>)> {
        self.channel_labels
            .iter()
            .map(String::as_str)
            .zip(self.samples.axis_iter(Axis(1)))
    }
    pub fn duration_seconds(&self, sample_rate_hz: f64) -> f64 {
        self.num_samples() as f64 / sample_rate_hz
    }
    /// Smallest and largest finite sample across every channel, `None` if there are none.
    pub fn amplitude_range(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
pub fn validate_sample_rate(sample_rate_hz: f64) -> Result<f64, CaptureError> {
    if sample_rate_hz.is_finite() && sample_rate_hz > 0.0 {
        Ok(sample_rate_hz)
    } else {
        Err(CaptureError::InvalidSampleRate(sample_rate_hz))
    }
}
/// Seconds since the first sample, one entry per sample.
pub fn time_axis(num_samples: usize, sample_rate_hz: f64) -> Vec<f64> {
    (0..num_samples)
        .map(|i| i as f64 / sample_rate_hz)
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }
    #[test]
    fn time_axis_matches_recorder_clock() {
        let axis = time_axis(3, DEFAULT_SAMPLE_RATE_HZ);
        assert_eq!(axis.len(), 3);
        assert_eq!(axis[0], 0.0);
        assert!((axis[1] - 2.0833e-5).abs() < 1e-9);
        assert!((axis[2] - 4.1667e-5).abs() < 1e-9);
    }
    #[test]
    fn time_axis_has_constant_step() {
        let rate = 44_100.0;
        let axis = time_axis(1000, rate);
        assert_eq!(axis.len(), 1000);
        for pair in axis.windows(2) {
            assert!((pair[1] - pair[0] - 1.0 / rate).abs() < 1e-12);
        }
        assert!(time_axis(0, rate).is_empty());
    }
    #[test]
    fn columns_are_stored_in_header_order() {
        let table = CaptureTable::from_columns(
            labels(&["Mic_1", "Mic_2"]),
            vec![vec![0.1, 0.5], vec![-0.9, 0.3]],
        )
        .unwrap();
        assert_eq!(table.num_channels(), 2);
        assert_eq!(table.num_samples(), 2);
        let names: Vec<&str> = table.channels().map(|(name, _)| name).collect();
        assert_eq!(names, ["Mic_1", "Mic_2"]);
        assert_eq!(table.channel(1).unwrap().to_vec(), vec![-0.9, 0.3]);
        assert!(table.channel(2).is_none());
        assert_eq!(table.amplitude_range(), Some((-0.9, 0.5)));
    }
    #[test]
    fn ragged_columns_are_rejected() {
        let err = CaptureTable::from_columns(labels(&["A", "B"]), vec![vec![0.0; 3], vec![0.0; 2]])
            .unwrap_err();
        assert!(matches!(err, CaptureError::Parse { .. }));
        let err = CaptureTable::from_columns(labels(&["A"]), vec![]).unwrap_err();
        assert!(matches!(
            err,
            CaptureError::ChannelMismatch {
                expected: 1,
                actual: 0
            }
        ));
    }
    #[test]
    fn header_only_table_is_empty() {
        let table = CaptureTable::from_columns(labels(&["A", "B"]), vec![vec![], vec![]]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.num_channels(), 2);
        assert_eq!(table.duration_seconds(DEFAULT_SAMPLE_RATE_HZ), 0.0);
        assert_eq!(table.amplitude_range(), None);
    }
    #[test]
    fn sample_rate_must_be_positive() {
        assert!(validate_sample_rate(48_000.0).is_ok());
        assert!(validate_sample_rate(0.0).is_err());
        assert!(validate_sample_rate(-1.0).is_err());
        assert!(validate_sample_rate(f64::NAN).is_err());
    }
}
