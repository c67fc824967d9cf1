use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the selection panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("SpaceX Launch Records");
    ui.separator();

    site_selector(ui, state);
    ui.add_space(8.0);
    payload_selector(ui, state);
    ui.separator();

    booster_legend(ui, state);
}

fn site_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch site");

    let current = state.selection().site.clone();
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::All, SiteSelection::All.to_string())
                .clicked()
            {
                picked = Some(SiteSelection::All);
            }
            for site in state.dataset().sites() {
                let option = SiteSelection::Site(site.clone());
                if ui.selectable_label(current == option, site.as_str()).clicked() {
                    picked = Some(option);
                }
            }
        });

    if let Some(site) = picked {
        state.set_site(site);
    }
}

fn payload_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (kg)");

    let bounds = state.observed_range();
    let range = state.selection().payload_range;
    let (mut lo, mut hi) = (range.min(), range.max());

    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, bounds.min()..=bounds.max()).text("min"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, bounds.min()..=bounds.max()).text("max"))
        .changed();

    // Dragging one handle past the other drags the other along.
    if lo_changed && lo > hi {
        hi = lo;
    }
    if hi_changed && hi < lo {
        lo = hi;
    }
    if lo_changed || hi_changed {
        state.set_payload_range(PayloadRange::new(lo, hi));
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label(state.selection().payload_range.to_string());
        if ui.small_button("Reset").clicked() {
            state.reset_payload_range();
        }
    });
}

fn booster_legend(ui: &mut Ui, state: &AppState) {
    ui.strong("Booster version category");
    for category in state.dataset().booster_categories() {
        let color = state.booster_colors.color_for(category);
        ui.label(RichText::new(format!("● {category}")).color(color));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Chart", |ui: &mut Ui| {
            if ui.button("Copy pie chart JSON").clicked() {
                copy_chart_json(ui, state, ChartKind::Pie);
                ui.close_menu();
            }
            if ui.button("Copy scatter chart JSON").clicked() {
                copy_chart_json(ui, state, ChartKind::Scatter);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in view",
            state.dataset().len(),
            state.scatter().points.len()
        ));

        ui.separator();

        if ui.selectable_label(state.show_table, "Records table").clicked() {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn copy_chart_json(ui: &Ui, state: &mut AppState, kind: ChartKind) {
    match state.chart_json(kind) {
        Ok(json) => {
            ui.ctx().copy_text(json);
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export chart: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
