use log::{debug, info};
use crate::drivers::analysis::{ChannelPeak, PeakMap};
use crate::drivers::error::CaptureError;
use crate::drivers::report::PeakReport;
use crate::drivers::source::CaptureSource;
use crate::drivers::table::{time_axis, validate_sample_rate};
use crate::drivers::CaptureTable;
/// Everything derived from one capture: the table itself, its peaks and the ranking.
#[derive(Clone, Debug)]
pub struct CaptureAnalysis {
    pub source: String,
    pub sample_rate_hz: f64,
    pub table: CaptureTable,
    pub peaks: PeakMap,
    pub ranked: Vec<ChannelPeak>,
}
impl CaptureAnalysis {
    pub fn from_table(source: String, table: CaptureTable, sample_rate_hz: f64) -> Self {
        let peaks = PeakMap::from_table(&table);
        let ranked = peaks.ranked();
        Self {
            source,
            sample_rate_hz,
            table,
            peaks,
            ranked,
        }
    }
    pub fn time_axis(&self) -> Vec<f64> {
        time_axis(self.table.num_samples(), self.sample_rate_hz)
    }
    pub fn to_report(&self) -> PeakReport {
        PeakReport {
            source: self.source.clone(),
            sample_rate_hz: self.sample_rate_hz,
            num_channels: self.table.num_channels(),
            num_samples: self.table.num_samples(),
            duration_seconds: self.table.duration_seconds(self.sample_rate_hz),
            ranking: PeakReport::ranking_from(&self.ranked),
        }
    }
}
/// Load, then analyze. One shot; a failed load is returned as-is.
pub struct AnalysisPipeline<S: CaptureSource> {
    source: S,
    sample_rate_hz: f64,
}
impl<S: CaptureSource> AnalysisPipeline<S> {
    pub fn new(source: S, sample_rate_hz: f64) -> Result<Self, CaptureError> {
        Ok(Self {
            source,
            sample_rate_hz: validate_sample_rate(sample_rate_hz)?,
        })
    }
    pub fn run(&mut self) -> Result<CaptureAnalysis, CaptureError> {
        let table = self.source.load()?;
        let analysis =
            CaptureAnalysis::from_table(self.source.describe(), table, self.sample_rate_hz);
        for entry in analysis.peaks.iter() {
            debug!("peak {}: {}", entry.channel, entry.peak);
        }
        if let Some(loudest) = analysis.ranked.first() {
            info!(
                "loudest channel is {} with peak {:.4}",
                loudest.channel, loudest.peak
            );
        }
        Ok(analysis)
    }
}
