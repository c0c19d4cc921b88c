use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use crate::drivers::error::CaptureError;
use crate::drivers::pipeline::CaptureAnalysis;
use crate::drivers::plot::{render_channels_png, render_overlay_png, PlotStyle};
pub const CHANNELS_PNG: &str = "channels.png";
pub const OVERLAY_PNG: &str = "overlay.png";
pub const REPORT_JSON: &str = "peak_report.json";
/// Headless alternative to the viewer: both plots as PNG plus the JSON ranking.
/// Returns the written paths in that order.
pub fn export_analysis(
    analysis: &CaptureAnalysis,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, CaptureError> {
    fs::create_dir_all(out_dir)?;
    let channels_path = out_dir.join(CHANNELS_PNG);
    let png = render_channels_png(
        &analysis.table,
        analysis.sample_rate_hz,
        PlotStyle::channels(analysis.table.num_channels()),
    )?;
    fs::write(&channels_path, png)?;
    let overlay_path = out_dir.join(OVERLAY_PNG);
    let png = render_overlay_png(
        &analysis.table,
        analysis.sample_rate_hz,
        PlotStyle::overlay(),
    )?;
    fs::write(&overlay_path, png)?;
    let report_path = out_dir.join(REPORT_JSON);
    analysis.to_report().write_json(&report_path)?;
    info!("exported plots and report to {}", out_dir.display());
    Ok(vec![channels_path, overlay_path, report_path])
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::CaptureTable;
    #[test]
    fn writes_plots_and_report() {
        let table = CaptureTable::from_columns(
            vec!["Channel_0".into(), "Channel_1".into()],
            vec![vec![0.0, 0.25, -0.5], vec![0.75, 0.0, 0.0]],
        )
        .unwrap();
        let analysis = CaptureAnalysis::from_table("test".into(), table, 48_000.0);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plots");
        let written = export_analysis(&analysis, &out).unwrap();
        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(fs::metadata(path).unwrap().len() > 0, "{}", path.display());
        }
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(REPORT_JSON)).unwrap()).unwrap();
        assert_eq!(report["ranking"][0]["channel"], "Channel_1");
        assert_eq!(report["num_samples"], 3);
    }
}
