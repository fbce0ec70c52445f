//! GUI entry point for Truck Khata

mod app;
mod analytics_panel;
mod dashboard_panel;
mod entry_panel;
mod trips_panel;

use app::KhataApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ট্রাক খাতা",
        options,
        Box::new(|cc| Ok(Box::new(KhataApp::new(cc)))),
    )
}
