//! Data Table Widget
//! Filtered rows rendered with `egui_extras::TableBuilder`.

use crate::view::DashboardView;
use egui::{Align, Layout};
use egui_extras::{Column, TableBuilder};

const HEADER_HEIGHT: f32 = 22.0;
const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 280.0;

pub struct DataTable;

impl DataTable {
    pub fn show(ui: &mut egui::Ui, view: &DashboardView) {
        let header = &view.table_header;
        let rows = &view.table_rows;

        // Own id scope: the table keeps scroll and column widths in egui memory.
        ui.push_id("filtered_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(MAX_TABLE_HEIGHT)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(90.0), header.len())
                .header(HEADER_HEIGHT, |mut header_row| {
                    for name in header {
                        header_row.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let cells = &rows[row.index()];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
    }
}
