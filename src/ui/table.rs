use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::CellValue;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Every column of the currently visible rows, in source order.
pub fn data_preview(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.view() else {
        return;
    };
    if view.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    let columns = view.columns();
    ui.push_id("data_preview", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(60.0).clip(true), columns.len())
            .max_scroll_height(400.0)
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let Some(cells) = view.row(row.index()) else {
                        return;
                    };
                    for value in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell_text(value));
                        });
                    }
                });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_cells_render_blank() {
        assert_eq!(cell_text(&CellValue::Null), "");
        assert_eq!(cell_text(&CellValue::Float(12.0)), "12");
        assert_eq!(cell_text(&CellValue::String("Bag".into())), "Bag");
    }
}
