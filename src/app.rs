use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{cards, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.schema_error.is_some() {
        panels::schema_error(ui, state);
        return;
    }
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the dashboard  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("📊 {}", state.config.window_title));
            ui.add_space(8.0);
            cards::target_cards(ui, &state.metrics);

            ui.add_space(12.0);
            ui.heading("🚚 Week-wise Movements (Branch-wise)");
            plot::movement_chart(ui, state);

            ui.add_space(12.0);
            ui.heading("💰 Billing Status");
            cards::billing_cards(ui, &state.metrics);

            ui.add_space(12.0);
            ui.heading("⚖️ Bag vs Bulk Tonnage");
            plot::tonnage_pie(ui, state);

            ui.add_space(12.0);
            ui.heading("📋 Data Preview");
            table::data_preview(ui, state);
        });
}
