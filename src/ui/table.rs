use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::state::AppState;

const HEADERS: [&str; 6] = [
    "Flight",
    "Launch Site",
    "Payload Mass (kg)",
    "Outcome",
    "Booster Version",
    "Category",
];

/// Table of the launches currently shown in the scatter.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let records = state.visible_records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let r = records[row.index()];
                row.col(|ui| {
                    ui.label(r.flight_number.map(|n| n.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(r.site.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", r.payload_mass_kg));
                });
                row.col(|ui| {
                    let label = r.outcome.to_string();
                    let mut text = RichText::new(&label);
                    if let Some(c) = outcome_color(&label) {
                        text = text.color(c);
                    }
                    ui.label(text);
                });
                row.col(|ui| {
                    ui.label(r.booster_version.as_deref().unwrap_or(""));
                });
                row.col(|ui| {
                    ui.label(RichText::new(&r.booster_version_category)
                        .color(state.booster_colors.color_for(&r.booster_version_category)));
                });
            });
        });
}
