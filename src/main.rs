use clap::Parser;
use eframe::egui;
use quake_slider::app::QuakeSliderApp;
use quake_slider::config::ViewerConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::parse();
    log::info!("Starting with source {}", config.source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Quake Slider – Magnitude Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(QuakeSliderApp::new(config)))),
    )
}
