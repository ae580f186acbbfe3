use std::time::Duration;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct QuakeSliderApp {
    pub state: AppState,
    /// Snap the map back to the configured center on the next frame.
    recenter: bool,
}

impl QuakeSliderApp {
    /// Build the app and start fetching the configured feed.
    pub fn new(config: ViewerConfig) -> Self {
        let source = config.source.clone();
        let mut state = AppState::new(config);
        state.request_load(source);
        Self {
            state,
            recenter: true,
        }
    }
}

impl eframe::App for QuakeSliderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.poll_load() {
            ctx.request_repaint();
        }
        if self.state.loading() {
            // Keep polling the loader while the event loop is otherwise idle.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            if panels::top_bar(ui, &mut self.state) {
                self.recenter = true;
            }
        });

        // ---- Left side panel: bucket slider ----
        egui::SidePanel::left("bucket_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let recenter = std::mem::take(&mut self.recenter);
            if let Some(idx) = plot::quake_map(ui, &self.state, recenter) {
                self.state.popup = Some(idx);
            }
        });

        panels::quake_popup(ctx, &mut self.state);
    }
}
