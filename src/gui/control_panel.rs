//! Control Panel Widget
//! Left side panel with the year range selector and the crime multi-select.

use crate::data::{available_metrics, available_years, CleanTable, FilterSelection};
use crate::DashboardResult;
use egui::{Color32, RichText, ScrollArea, Slider};

/// Filter controls; holds the last selection made by the user.
pub struct ControlPanel {
    pub years: Vec<i32>,
    pub start_idx: usize,
    pub end_idx: usize,
    pub metrics: Vec<String>,
    pub selected_metrics: Vec<bool>,
}

impl ControlPanel {
    /// Full year range and the first metric preselected.
    pub fn new(table: &CleanTable) -> DashboardResult<Self> {
        let years: Vec<i32> = available_years(table)?.into_iter().collect();
        let metrics = available_metrics(table).to_vec();

        let mut selected_metrics = vec![false; metrics.len()];
        if let Some(first) = selected_metrics.first_mut() {
            *first = true;
        }

        Ok(Self {
            end_idx: years.len().saturating_sub(1),
            start_idx: 0,
            years,
            metrics,
            selected_metrics,
        })
    }

    pub fn get_selected_metrics(&self) -> Vec<String> {
        self.metrics
            .iter()
            .zip(self.selected_metrics.iter())
            .filter(|(_, &selected)| selected)
            .map(|(metric, _)| metric.clone())
            .collect()
    }

    /// Current selection, `None` when the table has no valid year.
    pub fn selection(&self) -> Option<FilterSelection> {
        let year_start = *self.years.get(self.start_idx)?;
        let year_end = *self.years.get(self.end_idx)?;

        Some(FilterSelection {
            year_start,
            year_end,
            metrics: self.get_selected_metrics(),
        })
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut changed = false;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🔎 Filters")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Year Range Section =====
        ui.label(RichText::new("📅 Year range").size(14.0).strong());
        ui.add_space(5.0);

        if self.years.is_empty() {
            ui.label(RichText::new("No valid years in the table").color(Color32::GRAY));
        } else {
            let last = self.years.len() - 1;
            let from_label = format!("From {}", self.years[self.start_idx]);
            let to_label = format!("To {}", self.years[self.end_idx]);

            let start = ui.add(
                Slider::new(&mut self.start_idx, 0..=last)
                    .show_value(false)
                    .text(from_label),
            );
            let end = ui.add(
                Slider::new(&mut self.end_idx, 0..=last)
                    .show_value(false)
                    .text(to_label),
            );

            // The range never inverts: the handle being moved pushes the other one.
            if start.changed() && self.start_idx > self.end_idx {
                self.end_idx = self.start_idx;
            }
            if end.changed() && self.end_idx < self.start_idx {
                self.start_idx = self.end_idx;
            }
            changed |= start.changed() || end.changed();
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Crime Selection Section =====
        ui.label(RichText::new("📊 Crimes").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("crime_list")
                    .max_height(360.0)
                    .show(ui, |ui| {
                        for (metric, selected) in
                            self.metrics.iter().zip(self.selected_metrics.iter_mut())
                        {
                            changed |= ui.checkbox(selected, metric).changed();
                        }
                    });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected_metrics.iter_mut().for_each(|v| *v = true);
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                self.selected_metrics.iter_mut().for_each(|v| *v = false);
                changed = true;
            }
        });

        if changed {
            ControlPanelAction::SelectionChanged
        } else {
            ControlPanelAction::None
        }
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//

/// Run tests with:
/// `cargo test -- --show-output tests_control_panel`
#[cfg(test)]
mod tests_control_panel {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn defaults_to_full_range_and_first_metric() -> DashboardResult<()> {
        let raw = df!(
            "ano" => &["2020", "2018", "2019"],
            "mes" => &["1", "1", "1"],
            "homicidio" => &["1", "2", "3"],
            "furto" => &["4", "5", "6"]
        )?;
        let table = CleanTable::from_raw(&raw)?;
        let panel = ControlPanel::new(&table)?;

        assert_eq!(panel.years, vec![2018, 2019, 2020]);
        assert_eq!(
            panel.selection(),
            Some(FilterSelection {
                year_start: 2018,
                year_end: 2020,
                metrics: vec!["homicidio".to_string()],
            })
        );
        assert_eq!(panel.selection(), FilterSelection::initial(&table)?);
        Ok(())
    }

    #[test]
    fn no_years_means_no_selection() -> DashboardResult<()> {
        let raw = df!("ano" => &["?"], "mes" => &["1"], "furto" => &["4"])?;
        let panel = ControlPanel::new(&CleanTable::from_raw(&raw)?)?;

        assert!(panel.selection().is_none());
        Ok(())
    }
}
