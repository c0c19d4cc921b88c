use std::io::Cursor;
use std::ops::Range;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use log::{debug, warn};
use ndarray::ArrayView1;
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::CaptureError;
use crate::drivers::table::time_axis;
use crate::drivers::CaptureTable;
pub const OVERLAY_TITLE: &str = "All Channels Overlay (For Timing Analysis)";
pub const TIME_AXIS_LABEL: &str = "Time (seconds)";
pub const AMPLITUDE_AXIS_LABEL: &str = "Amplitude";
/// Pixels reserved per stacked subplot in the channel view.
pub const MIN_SUBPLOT_HEIGHT_PX: u32 = 100;
const TITLE_AREA_PX: u32 = 60;
/// One color per UMA-8 capsule; wraps around for wider captures.
pub const CHANNEL_PALETTE: [RGBColor; 8] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x17, 0xbe, 0xcf),
];
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl PlotStyle {
    /// Grows past the default height once the channels would not fit at
    /// [`MIN_SUBPLOT_HEIGHT_PX`] each.
    pub fn channels(num_channels: usize) -> Self {
        let default = Self::default();
        let rows = u32::try_from(num_channels.max(1)).unwrap_or(u32::MAX);
        let needed = rows
            .saturating_mul(MIN_SUBPLOT_HEIGHT_PX)
            .saturating_add(TITLE_AREA_PX);
        Self {
            height: default.height.max(needed),
            ..default
        }
    }
    pub fn overlay() -> Self {
        Self {
            height: 800,
            ..Self::default()
        }
    }
    pub fn color(&self, channel_index: usize) -> RGBColor {
        self.palette
            .get(channel_index % self.palette.len().max(1))
            .copied()
            .unwrap_or(WHITE)
    }
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
            background: RGBColor(10, 10, 10),
            foreground: WHITE,
            palette: CHANNEL_PALETTE.to_vec(),
        }
    }
}
pub fn channels_title(table: &CaptureTable) -> String {
    format!("UMA-8 Individual Waveforms ({} samples)", table.num_samples())
}
/// Header names like `Channel_0` read better as `Channel 0` on an axis.
pub fn display_label(channel: &str) -> String {
    channel.replace('_', " ")
}
/// X range shared by every view. An empty capture gets a unit axis.
pub fn time_bounds(table: &CaptureTable, sample_rate_hz: f64) -> Range<f64> {
    let end = table.duration_seconds(sample_rate_hz);
    if end > 0.0 {
        0.0..end
    } else {
        0.0..1.0
    }
}
/// Y range shared by every view: data min/max, always spanning zero, padded by 5%.
pub fn amplitude_bounds(table: &CaptureTable) -> Range<f64> {
    let (lo, hi) = table
        .amplitude_range()
        .map(|(lo, hi)| (lo.min(0.0), hi.max(0.0)))
        .unwrap_or((0.0, 0.0));
    if (hi - lo).abs() < f64::EPSILON {
        return -1.0..1.0;
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}
/// `(time, sample)` pairs for one channel; `nan`/`inf` samples are left out.
pub fn finite_points<'a>(
    times: &'a [f64],
    samples: ArrayView1<'a, f64>,
) -> impl Iterator<Item = (f64, f64)> + 'a {
    times
        .iter()
        .copied()
        .zip(samples.into_iter().copied())
        .filter(|(_, v)| v.is_finite())
}
/// One stacked subplot per channel, all sharing the same time and amplitude ranges.
pub fn render_channels_png(
    table: &CaptureTable,
    sample_rate_hz: f64,
    style: PlotStyle,
) -> Result<Vec<u8>, CaptureError> {
    if table.is_empty() {
        warn!("capture has no samples; rendering empty channel axes");
    }
    let times = time_axis(table.num_samples(), sample_rate_hz);
    let x_bounds = time_bounds(table, sample_rate_hz);
    let y_bounds = amplitude_bounds(table);
    debug!("channel view bounds x={x_bounds:?} y={y_bounds:?}");
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let root = root.titled(
            &channels_title(table),
            ("sans-serif", 24).into_font().color(&style.foreground),
        )?;
        let rows = table.num_channels().max(1);
        let panels = root.split_evenly((rows, 1));
        let labels = table.channel_labels();
        for (idx, panel) in panels.iter().enumerate() {
            let is_last = idx + 1 == rows;
            let mut chart = ChartBuilder::on(panel)
                .margin(5)
                .set_label_area_size(LabelAreaPosition::Left, 110)
                .set_label_area_size(LabelAreaPosition::Bottom, if is_last { 40 } else { 0 })
                .build_cartesian_2d(x_bounds.clone(), y_bounds.clone())?;
            let label = labels
                .get(idx)
                .map(|name| display_label(name))
                .unwrap_or_default();
            let mut mesh = chart.configure_mesh();
            mesh.light_line_style(&style.foreground.mix(0.1))
                .bold_line_style(&style.foreground.mix(0.2))
                .axis_style(&style.foreground.mix(0.6))
                .label_style(("sans-serif", 12).into_font().color(&style.foreground))
                .axis_desc_style(("sans-serif", 14).into_font().color(&style.foreground))
                .y_labels(3)
                .y_desc(label);
            if is_last {
                mesh.x_desc(TIME_AXIS_LABEL);
            } else {
                mesh.x_labels(0);
            }
            mesh.draw()?;
            if let Some(samples) = table.channel(idx) {
                let color = style.color(idx);
                chart.draw_series(LineSeries::new(finite_points(&times, samples), &color))?;
            }
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Every channel on one set of axes, with a legend, for comparing onset timing.
pub fn render_overlay_png(
    table: &CaptureTable,
    sample_rate_hz: f64,
    style: PlotStyle,
) -> Result<Vec<u8>, CaptureError> {
    if table.is_empty() {
        warn!("capture has no samples; rendering empty overlay axes");
    }
    let times = time_axis(table.num_samples(), sample_rate_hz);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                OVERLAY_TITLE,
                ("sans-serif", 24).into_font().color(&style.foreground),
            )
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(
                time_bounds(table, sample_rate_hz),
                amplitude_bounds(table),
            )?;
        chart
            .configure_mesh()
            .light_line_style(&style.foreground.mix(0.1))
            .axis_style(&style.foreground.mix(0.6))
            .label_style(("sans-serif", 12).into_font().color(&style.foreground))
            .axis_desc_style(("sans-serif", 14).into_font().color(&style.foreground))
            .x_desc(TIME_AXIS_LABEL)
            .y_desc(AMPLITUDE_AXIS_LABEL)
            .draw()?;
        for (idx, (name, samples)) in table.channels().enumerate() {
            let color = style.color(idx);
            chart
                .draw_series(LineSeries::new(finite_points(&times, samples), &color))?
                .label(name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        if table.num_channels() > 0 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font(("sans-serif", 14).into_font().color(&style.foreground))
                .border_style(&style.foreground.mix(0.2))
                .background_style(&style.background)
                .draw()?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, CaptureError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| CaptureError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
