use eframe::egui::{self, Color32, Context, RichText, ScrollArea, Ui};

use crate::color::bucket_palette;
use crate::data::bins::BUCKET_COUNT;
use crate::data::export::export_csv;
use crate::data::model::Quake;
use crate::data::selection::OPEN_RANGE_CAP;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – bucket slider
// ---------------------------------------------------------------------------

/// Render the left panel: range label, slider, arrows, show-all, legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Magnitude");
    ui.separator();

    if state.dataset.is_none() {
        if state.loading() {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Loading feed…");
            });
        } else {
            ui.label("No dataset loaded.");
        }
        return;
    }

    let has_buckets = state.buckets.is_some();
    let enabled = has_buckets && !state.selection.show_all;

    ui.label(RichText::new(&state.range_label).strong());
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(enabled, egui::Button::new("◀")).clicked() {
            state.previous_bucket();
        }

        let mut value = state.selection.index();
        let slider = egui::Slider::new(&mut value, 0..=BUCKET_COUNT - 1)
            .step_by(1.0)
            .show_value(true);
        if ui.add_enabled(enabled, slider).changed() {
            state.set_slider(value);
        }

        if ui.add_enabled(enabled, egui::Button::new("▶")).clicked() {
            state.next_bucket();
        }
    });

    let mut show_all = state.selection.show_all;
    if ui
        .add_enabled(has_buckets, egui::Checkbox::new(&mut show_all, "Show all"))
        .changed()
    {
        state.set_show_all(show_all);
    }

    ui.separator();
    bucket_legend(ui, state);
}

/// Table of buckets: swatch, range, member count. Clicking a row selects it.
fn bucket_legend(ui: &mut Ui, state: &mut AppState) {
    let Some(buckets) = &state.buckets else {
        return;
    };
    let palette = bucket_palette();
    let selected = state.selection.index();
    let show_all = state.selection.show_all;

    let mut clicked = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("bucket_legend")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("");
                    ui.strong("Range");
                    ui.strong("Events");
                    ui.end_row();

                    for (i, bucket) in buckets.iter().enumerate() {
                        let swatch = palette.get(i).copied().unwrap_or(Color32::GRAY);
                        ui.label(RichText::new("■").color(swatch));

                        let upper = if bucket.is_unbounded() {
                            OPEN_RANGE_CAP
                        } else {
                            bucket.max
                        };
                        let text = format!("{} – {}", bucket.min, upper);
                        let is_current = !show_all && i == selected;
                        if ui.selectable_label(is_current, text).clicked() {
                            clicked = Some(i);
                        }
                        ui.label(bucket.len().to_string());
                        ui.end_row();
                    }
                });

            if buckets.dropped() > 0 {
                ui.add_space(4.0);
                ui.weak(format!(
                    "{} events below the first boundary are not in any bucket",
                    buckets.dropped()
                ));
            }
        });

    if let Some(i) = clicked {
        if show_all {
            state.set_show_all(false);
        }
        state.set_slider(i);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> bool {
    let mut recenter = false;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            let can_export = !state.visible_indices.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export visible as CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        if ui.button("Reset view").clicked() {
            recenter = true;
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} events loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if state.loading() {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    recenter
}

// ---------------------------------------------------------------------------
// Marker popup
// ---------------------------------------------------------------------------

/// `(label, value)` rows shown in a marker's popup.
pub fn popup_fields(quake: &Quake) -> Vec<(&'static str, String)> {
    let or_unknown = |v: Option<String>| v.unwrap_or_else(|| "unknown".to_string());
    vec![
        ("Location", quake.place().to_string()),
        ("Magnitude", or_unknown(quake.magnitude().map(|m| m.to_string()))),
        ("Depth", or_unknown(quake.depth().map(|d| format!("{d} km")))),
        (
            "Time",
            or_unknown(quake.time().map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())),
        ),
    ]
}

/// Details window for the clicked marker.
pub fn quake_popup(ctx: &Context, state: &mut AppState) {
    let Some(quake) = state.popup_quake() else {
        return;
    };
    let fields = popup_fields(quake);
    let url = quake.properties.url.clone();

    let mut open = true;
    egui::Window::new("Earthquake")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            egui::Grid::new("quake_popup").num_columns(2).show(ui, |ui: &mut Ui| {
                for (label, value) in &fields {
                    ui.strong(format!("{label}:"));
                    ui.label(value);
                    ui.end_row();
                }
            });
            if let Some(url) = &url {
                ui.hyperlink_to("More Info", url);
            }
        });

    if !open {
        state.popup = None;
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open earthquake feed")
        .add_filter("GeoJSON", &["geojson", "json"])
        .pick_file();

    if let Some(path) = file {
        state.request_load(path.display().to_string());
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export visible events")
        .add_filter("CSV", &["csv"])
        .set_file_name("quakes.csv")
        .save_file();

    let Some(path) = file else {
        return;
    };
    let result = {
        let quakes = state.visible_quakes();
        export_csv(&path, &quakes).map(|()| quakes.len())
    };
    match result {
        Ok(n) => log::info!("Exported {n} events to {}", path.display()),
        Err(e) => {
            log::error!("Failed to export: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Geometry, QuakeProperties};

    #[test]
    fn popup_shows_place_magnitude_and_depth() {
        let q = Quake {
            properties: QuakeProperties {
                mag: Some(4.7),
                place: Some("35 km NE of Hualien City, Taiwan".into()),
                time: Some(1_700_000_000_000),
                url: Some("https://example.org/eq".into()),
            },
            geometry: Some(Geometry {
                coordinates: vec![121.8, 24.2, 12.5],
            }),
            ..Default::default()
        };
        let fields = popup_fields(&q);
        assert_eq!(fields[0].1, "35 km NE of Hualien City, Taiwan");
        assert_eq!(fields[1].1, "4.7");
        assert_eq!(fields[2].1, "12.5 km");
        assert_ne!(fields[3].1, "unknown");
    }

    #[test]
    fn popup_marks_missing_values() {
        let fields = popup_fields(&Quake::default());
        assert_eq!(fields[0].1, "Unknown location");
        assert!(fields[1..].iter().all(|(_, v)| v == "unknown"));
    }
}
