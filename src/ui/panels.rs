use eframe::egui::{self, Color32, RichText, Ui};

use crate::layout::{Dropdown, Heading, RangeSlider};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Heading
// ---------------------------------------------------------------------------

pub fn heading(ui: &mut Ui, heading: &Heading) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(&heading.text)
                .color(heading.color)
                .size(heading.size),
        );
    });
}

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

/// Searchable site selector. Picking an option fires `site_changed`.
pub fn site_dropdown(ui: &mut Ui, dropdown: &Dropdown, state: &mut AppState) {
    let selected = &state.filters.selected_site;
    let selected_text = dropdown
        .options
        .iter()
        .find(|o| o.value == *selected)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| selected.to_string());

    let mut picked = None;

    egui::ComboBox::from_id_salt(("dropdown", dropdown.id))
        .selected_text(selected_text)
        .width(ui.available_width().min(400.0))
        .show_ui(ui, |ui: &mut Ui| {
            if dropdown.searchable {
                ui.add(
                    egui::TextEdit::singleline(&mut state.site_search)
                        .hint_text(dropdown.placeholder),
                );
                ui.separator();
            }
            let needle = state.site_search.to_lowercase();
            for option in &dropdown.options {
                if !needle.is_empty() && !option.label.to_lowercase().contains(&needle) {
                    continue;
                }
                let is_selected = state.filters.selected_site == option.value;
                if ui.selectable_label(is_selected, &option.label).clicked() {
                    picked = Some(option.value.clone());
                }
            }
        });

    if let Some(site) = picked {
        state.site_search.clear();
        state.site_changed(site);
    }
}

// ---------------------------------------------------------------------------
// Payload range slider
// ---------------------------------------------------------------------------

/// Two-handle range control built from a pair of sliders.
pub fn payload_slider(ui: &mut Ui, slider: &RangeSlider, state: &mut AppState) {
    let current = state.filters.payload_range;
    let mut low = current.low;
    let mut high = current.high;

    let range = slider.min..=slider.max;
    let (low_changed, high_changed) = ui
        .push_id(("slider", slider.id), |ui: &mut Ui| {
            let low_changed = ui
                .add(
                    egui::Slider::new(&mut low, range.clone())
                        .step_by(slider.step)
                        .text("from (kg)"),
                )
                .changed();
            let high_changed = ui
                .add(
                    egui::Slider::new(&mut high, range)
                        .step_by(slider.step)
                        .text("to (kg)"),
                )
                .changed();
            (low_changed, high_changed)
        })
        .inner;

    // Keep the handles ordered: the one being dragged pushes the other.
    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }

    slider_marks(ui, slider);

    if low_changed || high_changed {
        state.payload_range_changed(low, high);
    }
}

/// Where `value` sits along a slider spanning `[min, max]`, in `[0, 1]`.
fn mark_fraction(value: f64, min: f64, max: f64) -> f32 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0) as f32
}

/// Mark labels painted under the slider rail at their values.
fn slider_marks(ui: &mut Ui, slider: &RangeSlider) {
    let width = ui.spacing().slider_width;
    let height = ui.text_style_height(&egui::TextStyle::Small);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    // The handle centre never reaches the rail ends.
    let inset = ui.spacing().interact_size.y / 2.5;
    let rail = rect.shrink2(egui::vec2(inset, 0.0));

    let font = egui::TextStyle::Small.resolve(ui.style());
    let color = ui.visuals().weak_text_color();
    let painter = ui.painter();
    for mark in &slider.marks {
        let t = mark_fraction(mark.value, slider.min, slider.max);
        painter.text(
            egui::pos2(rail.lerp_inside(egui::vec2(t, 0.5)).x, rect.center().y),
            egui::Align2::CENTER_CENTER,
            &mark.label,
            font.clone(),
            color,
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches, {} sites, payload {}–{} kg",
            state.dataset.len(),
            state.dataset.sites.len(),
            state.dataset.min_payload,
            state.dataset.max_payload
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
