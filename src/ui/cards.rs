use eframe::egui::{self, RichText, Ui};

use crate::data::metrics::DashboardMetrics;

const CRORE: f64 = 1e7;

/// `₹ 8.00 Cr` style amount.
pub fn format_crore(amount: f64) -> String {
    format!("₹ {:.2} Cr", amount / CRORE)
}

pub fn format_pct(pct: f64) -> String {
    format!("{pct:.1}%")
}

fn card(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(title);
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

fn card_row(ui: &mut Ui, cards: [(&str, String); 3]) {
    ui.columns(3, |cols| {
        for (col, (title, value)) in cols.iter_mut().zip(cards) {
            card(col, title, value);
        }
    });
}

/// Target / achieved / achievement % row.
pub fn target_cards(ui: &mut Ui, m: &DashboardMetrics) {
    card_row(
        ui,
        [
            ("🎯 Monthly Target", format_crore(m.target)),
            ("✅ Achieved Revenue", format_crore(m.achieved)),
            ("📈 Achievement %", format_pct(m.achievement_pct)),
        ],
    );
}

/// Freight / non-freight / unbilled row.
pub fn billing_cards(ui: &mut Ui, m: &DashboardMetrics) {
    card_row(
        ui,
        [
            ("Freight Billed", format_crore(m.billing.freight_billed)),
            ("Non-Freight Billed", format_crore(m.billing.non_freight_billed)),
            ("Unbilled Amount", format_crore(m.billing.unbilled)),
        ],
    );
}
