use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use serde::Serialize;
use crate::drivers::analysis::ChannelPeak;
use crate::drivers::CaptureError;
pub const REPORT_HEADING: &str = "--- Peak Amplitude Analysis (Loudness) ---";
/// `rank. channel: peak` lines, 1-indexed, peak to four decimals.
pub fn format_report(ranked: &[ChannelPeak]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(idx, entry)| format!("{}. {}: {:.4}", idx + 1, entry.channel, entry.peak))
        .collect()
}
pub fn write_report<W: Write>(out: &mut W, ranked: &[ChannelPeak]) -> io::Result<()> {
    writeln!(out, "{REPORT_HEADING}")?;
    for line in format_report(ranked) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
/// Short guide for reading the overlay view when looking for the first mic to hear an event.
pub fn write_analysis_hints<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "--- How to Analyze the Plots ---")?;
    writeln!(
        out,
        "1. The ranking above shows which mic detected the loudest sound."
    )?;
    writeln!(
        out,
        "2. In the 'All Channels Overlay' view, drag a box with the right mouse button"
    )?;
    writeln!(out, "   around the very beginning of the sound event to zoom in.")?;
    writeln!(
        out,
        "3. As you zoom in, you will be able to see which colored line rises from zero first."
    )?;
    Ok(())
}
#[derive(Clone, Debug, Serialize)]
pub struct RankedPeak {
    pub rank: usize,
    pub channel: String,
    pub peak: f64,
}
/// Machine readable summary written alongside exported plots.
#[derive(Clone, Debug, Serialize)]
pub struct PeakReport {
    pub source: String,
    pub sample_rate_hz: f64,
    pub num_channels: usize,
    pub num_samples: usize,
    pub duration_seconds: f64,
    pub ranking: Vec<RankedPeak>,
}
impl PeakReport {
    pub fn ranking_from(ranked: &[ChannelPeak]) -> Vec<RankedPeak> {
        ranked
            .iter()
            .enumerate()
            .map(|(idx, entry)| RankedPeak {
                rank: idx + 1,
                channel: entry.channel.clone(),
                peak: entry.peak,
            })
            .collect()
    }
    pub fn write_json(&self, path: &Path) -> Result<(), CaptureError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
