//! Chart Plotter Module
//! Draws the crime trend line chart and the summary grid using egui_plot.

use crate::charts::series::{month_label, ChartData};
use crate::stats::SeriesSummary;
use egui::{Color32, RichText};
use egui_plot::{uniform_grid_spacer, Legend, Line, Plot, PlotPoints};

const CHART_HEIGHT: f32 = 380.0;

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn get_series_color(series_index: usize) -> Color32 {
        PALETTE[series_index % PALETTE.len()]
    }

    /// Time-axis line chart, one line per metric.
    /// X-axis: month index with `%b/%Y` ticks, Y-axis: cases.
    pub fn draw_trend_chart(ui: &mut egui::Ui, chart_data: &ChartData) {
        ui.label(RichText::new(&chart_data.title).size(16.0).strong());
        ui.add_space(6.0);

        Plot::new("crime_trend")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label("Month/Year")
            .y_axis_label("Cases")
            .allow_scroll(false)
            // month, quarter, year
            .x_grid_spacer(uniform_grid_spacer(|_input| [1.0, 3.0, 12.0]))
            .x_axis_formatter(|mark, _range| month_label(mark.value))
            .label_formatter(|name, value| {
                let month = month_label(value.x.round());
                if name.is_empty() {
                    format!("{month}\n{:.2}", value.y)
                } else {
                    format!("{name}\n{month}\n{:.2}", value.y)
                }
            })
            .show(ui, |plot_ui| {
                for (index, series) in chart_data.series.iter().enumerate() {
                    let color = Self::get_series_color(index);

                    // Lines with the same name share one legend entry.
                    for segment in series.segments() {
                        plot_ui.line(
                            Line::new(PlotPoints::from(segment))
                                .color(color)
                                .width(2.0)
                                .name(&series.metric),
                        );
                    }
                }
            });
    }

    /// Per-metric descriptive statistics.
    pub fn draw_summary_table(ui: &mut egui::Ui, summaries: &[SeriesSummary]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Crime", "N", "Total", "Mean", "Median", "Std", "Min", "Max"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for (index, summary) in summaries.iter().enumerate() {
                            ui.label(
                                RichText::new(&summary.metric)
                                    .size(11.0)
                                    .color(Self::get_series_color(index)),
                            );
                            ui.label(RichText::new(summary.count.to_string()).size(11.0));

                            for value in [
                                summary.total,
                                summary.mean,
                                summary.median,
                                summary.std,
                                summary.min,
                                summary.max,
                            ] {
                                ui.label(RichText::new(format_stat(value)).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.2}")
    }
}
