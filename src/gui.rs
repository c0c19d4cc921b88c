// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use crate::drivers::plot::{
    amplitude_bounds, channels_title, display_label, finite_points, time_bounds,
    AMPLITUDE_AXIS_LABEL, CHANNEL_PALETTE, OVERLAY_TITLE, TIME_AXIS_LABEL,
};
use crate::drivers::CaptureAnalysis;
const MIN_SUBPLOT_HEIGHT: f32 = 80.0;
struct ChannelTrace {
    label: String,
    axis_label: String,
    color: Color32,
    points: Vec<[f64; 2]>,
}
/// Per-channel subplots in the main panel, overlay in a second closable window.
pub struct WaveformViewer {
    title: String,
    traces: Vec<ChannelTrace>,
    x_bounds: (f64, f64),
    y_bounds: (f64, f64),
    show_overlay: bool,
}
impl WaveformViewer {
    pub fn new(analysis: &CaptureAnalysis) -> Self {
        let table = &analysis.table;
        let times = analysis.time_axis();
        let traces = table
            .channels()
            .enumerate()
            .map(|(idx, (name, samples))| {
                let rgb = CHANNEL_PALETTE[idx % CHANNEL_PALETTE.len()];
                ChannelTrace {
                    label: name.to_owned(),
                    axis_label: display_label(name),
                    color: Color32::from_rgb(rgb.0, rgb.1, rgb.2),
                    points: finite_points(&times, samples)
                        .map(|(t, v)| [t, v])
                        .collect(),
                }
            })
            .collect();
        let x = time_bounds(table, analysis.sample_rate_hz);
        let y = amplitude_bounds(table);
        Self {
            title: channels_title(table),
            traces,
            x_bounds: (x.start, x.end),
            y_bounds: (y.start, y.end),
            show_overlay: true,
        }
    }
    fn base_plot(&self, id: impl std::hash::Hash) -> Plot {
        Plot::new(id)
            .include_x(self.x_bounds.0)
            .include_x(self.x_bounds.1)
            .include_y(self.y_bounds.0)
            .include_y(self.y_bounds.1)
    }
    fn channels_panel(&self, ui: &mut egui::Ui) {
        if self.traces.is_empty() {
            self.base_plot("channel-plot-empty")
                .x_axis_label(TIME_AXIS_LABEL)
                .show(ui, |_| {});
            return;
        }
        let count = self.traces.len();
        let spacing = ui.spacing().item_spacing.y;
        let height =
            ((ui.available_height() - spacing * count as f32) / count as f32).max(MIN_SUBPLOT_HEIGHT);
        let group = egui::Id::new("channel-plots");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (idx, trace) in self.traces.iter().enumerate() {
                let mut plot = self
                    .base_plot(("channel-plot", idx))
                    .height(height)
                    .link_axis(group, true, true)
                    .y_axis_label(trace.axis_label.clone());
                if idx + 1 == count {
                    plot = plot.x_axis_label(TIME_AXIS_LABEL);
                }
                plot.show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(PlotPoints::new(trace.points.clone()))
                            .color(trace.color)
                            .name(&trace.label),
                    );
                });
            }
        });
    }
    fn overlay_panel(&self, ui: &mut egui::Ui) {
        self.base_plot("overlay-plot")
            .legend(Legend::default())
            .x_axis_label(TIME_AXIS_LABEL)
            .y_axis_label(AMPLITUDE_AXIS_LABEL)
            .show(ui, |plot_ui| {
                for trace in &self.traces {
                    plot_ui.line(
                        Line::new(PlotPoints::new(trace.points.clone()))
                            .color(trace.color)
                            .name(&trace.label),
                    );
                }
            });
    }
}
impl eframe::App for WaveformViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.title);
                ui.checkbox(&mut self.show_overlay, "Overlay window");
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| self.channels_panel(ui));
        let mut open = self.show_overlay;
        egui::Window::new(OVERLAY_TITLE)
            .open(&mut open)
            .default_size([900.0, 480.0])
            .resizable(true)
            .show(ctx, |ui| self.overlay_panel(ui));
        self.show_overlay = open;
    }
}
/// Opens the viewer and blocks until the user closes it.
pub fn show(analysis: &CaptureAnalysis) -> Result<(), eframe::Error> {
    let viewer = WaveformViewer::new(analysis);
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1500.0, 1000.0])
        .with_min_inner_size([640.0, 480.0])
        .with_title("UMA-8 Waveforms");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "uma8-scope",
        options,
        Box::new(move |_cc| Box::new(viewer)),
    )
}
