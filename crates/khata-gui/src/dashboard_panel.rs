//! Dashboard panel: business totals, recent trips, CSV export

use eframe::egui::{self, Color32, RichText};
use khata_app::export::{default_report_filename, export_trips_csv};
use khata_app::Config;
use khata_store::TripStore;

/// Number of recent trips shown under the stat tiles
const RECENT_COUNT: usize = 5;

/// Panel showing overall totals and the latest activity
pub struct DashboardPanel {
    /// Status message from the last export
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl DashboardPanel {
    /// Create a new dashboard panel
    pub fn new() -> Self {
        Self {
            status_message: None,
        }
    }

    /// Render the panel UI
    pub fn ui(&mut self, ui: &mut egui::Ui, store: &TripStore, config: &Config) {
        ui.heading("ড্যাশবোর্ড");
        ui.separator();
        ui.add_space(8.0);

        let stats = store.stats();
        let currency = config.currency.as_str();

        // Stat tiles
        ui.columns(3, |columns| {
            stat_tile(
                &mut columns[0],
                "মোট আয়",
                &format!("{}{}", currency, stats.total_income),
                Color32::LIGHT_GREEN,
            );
            stat_tile(
                &mut columns[1],
                "মোট ব্যয়",
                &format!("{}{}", currency, stats.total_expense),
                Color32::LIGHT_RED,
            );
            stat_tile(
                &mut columns[2],
                "মোট নিট লাভ",
                &format!("{}{}", currency, stats.total_profit),
                Color32::LIGHT_BLUE,
            );
        });

        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("মোট {} টি ট্রিপ", stats.trip_count))
                .color(Color32::GRAY)
                .small(),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(8.0);

        // Recent trips
        ui.label(RichText::new("সাম্প্রতিক ট্রিপ").strong());
        ui.add_space(5.0);

        let recent = store.recent(RECENT_COUNT);
        if recent.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(RichText::new("কোন ট্রিপ নেই").color(Color32::GRAY));
            });
        } else {
            egui::Grid::new("recent_trips")
                .num_columns(4)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    for trip in recent {
                        ui.label(trip.date.format("%Y-%m-%d").to_string());
                        ui.label(RichText::new(&trip.truck_number).strong());
                        ui.label(format!("{}{}", currency, trip.income));
                        let profit_color = if trip.net_profit >= 0.0 {
                            Color32::LIGHT_GREEN
                        } else {
                            Color32::LIGHT_RED
                        };
                        ui.label(
                            RichText::new(format!("{}{}", currency, trip.net_profit))
                                .color(profit_color),
                        );
                        ui.end_row();
                    }
                });
        }

        ui.add_space(20.0);
        ui.separator();
        ui.add_space(8.0);

        // CSV export
        if ui.button("এক্সপোর্ট (CSV)").clicked() {
            self.export_report(store);
        }

        if let Some((ref msg, is_error)) = self.status_message {
            ui.add_space(8.0);
            let color = if is_error {
                Color32::LIGHT_RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    }

    /// Pick a destination and write the CSV report
    fn export_report(&mut self, store: &TripStore) {
        let today = chrono::Local::now().date_naive();
        let file = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(default_report_filename(today))
            .save_file();

        if let Some(path) = file {
            match export_trips_csv(store.all(), &path) {
                Ok(()) => {
                    self.status_message = Some((
                        format!("রিপোর্ট সংরক্ষিত হয়েছে: {}", path.display()),
                        false,
                    ));
                }
                Err(e) => {
                    self.status_message = Some((format!("এক্সপোর্ট ত্রুটি: {}", e), true));
                }
            }
        }
    }
}

fn stat_tile(ui: &mut egui::Ui, label: &str, value: &str, color: Color32) {
    egui::Frame::new()
        .fill(Color32::from_gray(30))
        .inner_margin(12.0)
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.label(RichText::new(label).color(Color32::GRAY).small());
            ui.label(RichText::new(value).color(color).size(22.0).strong());
        });
}

impl Default for DashboardPanel {
    fn default() -> Self {
        Self::new()
    }
}
