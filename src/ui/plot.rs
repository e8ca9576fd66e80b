use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::data::metrics::{MovementCounts, Tonnage};
use crate::data::model::CellValue;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Week-wise movements (line chart)
// ---------------------------------------------------------------------------

/// x position of every week: its index in sorted week order.
fn week_axis(movements: &MovementCounts) -> Vec<(CellValue, f64)> {
    movements
        .weeks()
        .into_iter()
        .enumerate()
        .map(|(i, w)| (w.clone(), i as f64))
        .collect()
}

/// One line (with markers) per branch: x = week, y = distinct movements.
pub fn movement_chart(ui: &mut Ui, state: &AppState) {
    let movements = &state.metrics.movements;
    if movements.is_empty() {
        ui.label("No movements for the current selection.");
        return;
    }

    let axis = week_axis(movements);
    let labels: Vec<String> = axis.iter().map(|(w, _)| w.to_string()).collect();
    let x_of: BTreeMap<&CellValue, f64> = axis.iter().map(|(w, x)| (w, *x)).collect();

    Plot::new("movement_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Week")
        .y_axis_label("No of Movements")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (unit, points) in movements.series() {
                let color = state.unit_colors.color_for(unit);
                let name = unit.to_string();
                let xy: Vec<[f64; 2]> = points
                    .iter()
                    .map(|(week, n)| {
                        let x = x_of.get(week).copied().unwrap_or_default();
                        [x, *n as f64]
                    })
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(xy.clone()))
                        .name(&name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(xy))
                        .name(&name)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Bag vs bulk tonnage (pie chart)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct Slice {
    load_type: CellValue,
    weight: f64,
    start: f64,
    end: f64,
}

/// Slice angles in radians, clockwise from 12 o'clock.
/// Non-positive weights get no slice.
fn pie_slices(tonnage: &Tonnage) -> Vec<Slice> {
    let total: f64 = tonnage.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = -FRAC_PI_2;
    tonnage
        .iter()
        .filter(|(_, w)| *w > 0.0)
        .map(|(load_type, weight)| {
            let start = angle;
            angle += weight / total * TAU;
            Slice {
                load_type: load_type.clone(),
                weight,
                start,
                end: angle,
            }
        })
        .collect()
}

fn point_on_circle(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    Pos2::new(
        center.x + radius * angle.cos() as f32,
        center.y + radius * angle.sin() as f32,
    )
}

/// Share-of-whole weight per load type, with a legend.
pub fn tonnage_pie(ui: &mut Ui, state: &AppState) {
    let tonnage = &state.metrics.tonnage;
    let slices = pie_slices(tonnage);
    if slices.is_empty() {
        ui.label("No tonnage for the current selection.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let size = 260.0;
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        for slice in &slices {
            let color = state.load_type_colors.color_for(&slice.load_type);
            let steps = (((slice.end - slice.start) / TAU) * 128.0).ceil().max(1.0) as usize;
            let step = (slice.end - slice.start) / steps as f64;
            for i in 0..steps {
                let a0 = slice.start + step * i as f64;
                let a1 = a0 + step;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        point_on_circle(center, radius, a0),
                        point_on_circle(center, radius, a1),
                    ],
                    color,
                    Stroke::NONE,
                ));
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for slice in &slices {
                let color = state.load_type_colors.color_for(&slice.load_type);
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(color));
                    ui.label(format!(
                        "{}: {:.2} ({:.1}%)",
                        slice.load_type,
                        slice.weight,
                        tonnage.share(&slice.load_type) * 100.0
                    ));
                });
            }
            ui.label(RichText::new(format!("Total: {:.2}", tonnage.total())).color(Color32::GRAY));
        });
    });
}
