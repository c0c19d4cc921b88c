//! Coarse loudness analysis: the largest absolute sample seen on each channel.
//!
//! - Empty channels report a peak of `0.0`.
//! - NaN samples never win the reduction, so every peak is `>= 0` and comparable.
//! - Ranking is descending by peak; equal peaks keep header order.
use serde::Serialize;
use crate::drivers::CaptureTable;
/// Peak absolute amplitude of one channel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelPeak {
    pub channel: String,
    pub peak: f64,
}
/// Maximum absolute value of `samples`, or `0.0` when there are none.
pub fn peak_amplitude<'a>(samples: impl IntoIterator<Item = &'a f64>) -> f64 {
    // f64::max discards a NaN operand.
    samples
        .into_iter()
        .fold(0.0f64, |acc, v| acc.max(v.abs()))
}
/// Per-channel peak amplitudes, in the capture's column order.
#[derive(Clone, Debug, Default)]
pub struct PeakMap {
    entries: Vec<ChannelPeak>,
}
impl PeakMap {
    pub fn from_table(table: &CaptureTable) -> Self {
        let entries = table
            .channels()
            .map(|(name, samples)| ChannelPeak {
                channel: name.to_owned(),
                peak: peak_amplitude(samples.iter()),
            })
            .collect();
        Self { entries }
    }
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    #[cfg(test)]
    pub fn get(&self, channel: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.channel == channel)
            .map(|entry| entry.peak)
    }
    pub fn iter(&self) -> impl Iterator<Item = &ChannelPeak> {
        self.entries.iter()
    }
    /// Loudest channel first. `sort_by` is stable, so ties stay in column order.
    pub fn ranked(&self) -> Vec<ChannelPeak> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.peak.total_cmp(&a.peak));
        ranked
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    fn table(labels: &[&str], columns: Vec<Vec<f64>>) -> CaptureTable {
        CaptureTable::from_columns(labels.iter().map(|s| s.to_string()).collect(), columns)
            .unwrap()
    }
    #[test]
    fn two_mic_example() {
        let capture = table(&["Mic_1", "Mic_2"], vec![vec![0.1, 0.5], vec![-0.9, 0.3]]);
        let peaks = PeakMap::from_table(&capture);
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks.get("Mic_1"), Some(0.5));
        assert_eq!(peaks.get("Mic_2"), Some(0.9));
        let ranked = peaks.ranked();
        assert_eq!(ranked[0].channel, "Mic_2");
        assert_eq!(ranked[0].peak, 0.9);
        assert_eq!(ranked[1].channel, "Mic_1");
        assert_eq!(ranked[1].peak, 0.5);
    }
    #[test]
    fn empty_channels_peak_at_zero() {
        let capture = table(&["A", "B", "C"], vec![vec![], vec![], vec![]]);
        let peaks = PeakMap::from_table(&capture);
        assert_eq!(peaks.len(), 3);
        assert!(peaks.iter().all(|p| p.peak == 0.0));
        assert_eq!(peak_amplitude(&[] as &[f64]), 0.0);
    }
    #[test]
    fn nan_samples_are_ignored() {
        assert_eq!(peak_amplitude(&[f64::NAN, -0.25, f64::NAN]), 0.25);
        assert_eq!(peak_amplitude(&[f64::NAN]), 0.0);
    }
    #[test]
    fn ties_keep_column_order() {
        let capture = table(
            &["Mic_1", "Mic_2", "Mic_3", "Mic_4"],
            vec![vec![0.3], vec![-0.7], vec![0.7], vec![0.3]],
        );
        let names: Vec<String> = PeakMap::from_table(&capture)
            .ranked()
            .into_iter()
            .map(|p| p.channel)
            .collect();
        assert_eq!(names, ["Mic_2", "Mic_3", "Mic_1", "Mic_4"]);
    }
    #[test]
    fn random_tables_match_reference_reduction() {
        let mut rng = StdRng::seed_from_u64(0x0a8);
        for _ in 0..25 {
            let channels = rng.gen_range(1..=8);
            let samples = rng.gen_range(0..200);
            let columns: Vec<Vec<f64>> = (0..channels)
                .map(|_| (0..samples).map(|_| rng.gen_range(-1.0f64..1.0)).collect())
                .collect();
            let labels: Vec<String> = (0..channels).map(|i| format!("Channel_{i}")).collect();
            let capture = CaptureTable::from_columns(labels.clone(), columns.clone()).unwrap();
            let peaks = PeakMap::from_table(&capture);
            assert_eq!(peaks.len(), channels);
            for (label, column) in labels.iter().zip(&columns) {
                let mut expected = 0.0f64;
                for v in column {
                    if v.abs() > expected {
                        expected = v.abs();
                    }
                }
                assert_eq!(peaks.get(label), Some(expected));
            }
            let ranked = peaks.ranked();
            assert_eq!(ranked.len(), channels);
            for pair in ranked.windows(2) {
                assert!(pair[0].peak >= pair[1].peak);
                if pair[0].peak == pair[1].peak {
                    let pos = |name: &str| labels.iter().position(|l| l == name).unwrap();
                    assert!(pos(&pair[0].channel) < pos(&pair[1].channel));
                }
            }
        }
    }
}
