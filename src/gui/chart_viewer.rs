//! Chart Viewer Widget
//! Trend chart or "no data" notice, followed by the summary grid.

use crate::charts::{ChartPlotter, Presentation};
use crate::view::DashboardView;
use egui::{Color32, RichText};

const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, view: &DashboardView) {
        match &view.presentation {
            Presentation::Chart(chart_data) => {
                ChartPlotter::draw_trend_chart(ui, chart_data);
                ui.add_space(10.0);
                ui.label(RichText::new("Summary").size(14.0).strong());
                ui.add_space(4.0);
                ChartPlotter::draw_summary_table(ui, &view.summaries);
            }
            Presentation::NoData => Self::show_warning(
                ui,
                "No data for the selected year range/crimes.",
            ),
        }
    }

    pub fn show_warning(ui: &mut egui::Ui, message: &str) {
        egui::Frame::none()
            .stroke(egui::Stroke::new(1.5, WARNING_COLOR))
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("⚠ {message}")).size(14.0).color(WARNING_COLOR));
            });
    }
}
