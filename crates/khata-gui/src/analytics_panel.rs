//! Per-truck analytics panel

use eframe::egui::{self, Color32, ProgressBar, RichText, ScrollArea};
use khata_app::Config;
use khata_store::TripStore;

/// Panel showing per-truck performance, best earner first
pub struct AnalyticsPanel {}

impl AnalyticsPanel {
    /// Create a new analytics panel
    pub fn new() -> Self {
        Self {}
    }

    /// Render the panel UI
    pub fn ui(&mut self, ui: &mut egui::Ui, store: &TripStore, config: &Config) {
        ui.heading("গাড়ি ভিত্তিক পারফরম্যান্স");
        ui.separator();
        ui.add_space(8.0);

        let rollup = store.truck_stats();

        if rollup.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(
                    RichText::new("বিশ্লেষণের জন্য যথেষ্ট তথ্য নেই").color(Color32::GRAY),
                );
            });
            return;
        }

        let currency = config.currency.as_str();

        ScrollArea::vertical().show(ui, |ui| {
            for truck in &rollup {
                egui::Frame::new()
                    .fill(Color32::from_gray(30))
                    .inner_margin(12.0)
                    .corner_radius(6.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&truck.truck_number).strong().size(16.0));
                            ui.label(
                                RichText::new(format!("মোট {} টি ট্রিপ", truck.trip_count))
                                    .color(Color32::GRAY)
                                    .small(),
                            );
                        });

                        ui.add_space(6.0);

                        egui::Grid::new(format!("truck_{}", truck.truck_number))
                            .num_columns(2)
                            .spacing([24.0, 4.0])
                            .show(ui, |ui| {
                                ui.label(RichText::new("মোট আয়").color(Color32::GRAY));
                                ui.label(format!("{}{}", currency, truck.income));
                                ui.end_row();

                                ui.label(
                                    RichText::new("গড় লাভ (প্রতি ট্রিপ)").color(Color32::GRAY),
                                );
                                ui.label(format!("{}{:.0}", currency, truck.avg_profit()));
                                ui.end_row();

                                ui.label(RichText::new("মোট নিট লাভ").color(Color32::GRAY));
                                let profit_color = if truck.profit >= 0.0 {
                                    Color32::LIGHT_GREEN
                                } else {
                                    Color32::LIGHT_RED
                                };
                                ui.label(
                                    RichText::new(format!("{}{}", currency, truck.profit))
                                        .color(profit_color)
                                        .strong(),
                                );
                                ui.end_row();
                            });

                        ui.add_space(6.0);

                        // Profit as a share of income, capped at 100%
                        let margin = truck.margin_pct();
                        let fraction = (margin / 100.0).clamp(0.0, 1.0) as f32;
                        ui.add(ProgressBar::new(fraction).desired_height(6.0));
                        ui.label(
                            RichText::new(format!("মার্জিন: {:.1}%", margin))
                                .color(Color32::GRAY)
                                .small(),
                        );
                    });

                ui.add_space(10.0);
            }
        });
    }
}

impl Default for AnalyticsPanel {
    fn default() -> Self {
        Self::new()
    }
}
