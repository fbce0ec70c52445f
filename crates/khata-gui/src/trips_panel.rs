//! Trip list panel: search, details with photo, confirmed deletion

use eframe::egui::{self, Color32, ColorImage, RichText, ScrollArea, TextureHandle};
use khata_app::Config;
use khata_store::TripStore;

/// One row of display data, detached from the store borrow
struct TripRow {
    id: String,
    date: String,
    truck_number: String,
    description: String,
    income: f64,
    total_expense: f64,
    net_profit: f64,
    has_photo: bool,
}

/// Panel for browsing and deleting recorded trips
pub struct TripsPanel {
    /// Search query over truck number and description
    search_input: String,
    /// Currently selected trip id
    selected_id: Option<String>,
    /// Trip id awaiting delete confirmation
    confirm_delete: Option<String>,
    /// Id of the trip whose photo is currently cached
    preview_id: Option<String>,
    /// Decoded photo texture for the selected trip
    preview_texture: Option<TextureHandle>,
    /// Status message from the last action
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl TripsPanel {
    /// Create a new trips panel
    pub fn new() -> Self {
        Self {
            search_input: String::new(),
            selected_id: None,
            confirm_delete: None,
            preview_id: None,
            preview_texture: None,
            status_message: None,
        }
    }

    /// Render the panel UI
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        store: &mut TripStore,
        config: &Config,
    ) {
        ui.heading("ট্রিপের তালিকা");
        ui.separator();

        // Search row
        ui.horizontal(|ui| {
            ui.label("খুঁজুন:");
            ui.text_edit_singleline(&mut self.search_input);
            if !self.search_input.is_empty() && ui.small_button("✖").clicked() {
                self.search_input.clear();
            }
        });

        ui.add_space(8.0);

        // Detach rows from the store borrow so deletion can run afterwards
        let rows: Vec<TripRow> = if self.search_input.is_empty() {
            store.all().iter().map(to_row).collect()
        } else {
            store
                .search(&self.search_input)
                .into_iter()
                .map(to_row)
                .collect()
        };

        ui.label(format!("মোট: {} টি", rows.len()));
        ui.add_space(4.0);

        if rows.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new("কোন ট্রিপ পাওয়া যায়নি").color(Color32::GRAY));
            });
            return;
        }

        let currency = config.currency.as_str();
        let mut request_delete: Option<String> = None;

        ScrollArea::vertical()
            .max_height(ui.available_height() - 180.0)
            .show(ui, |ui| {
                egui::Grid::new("trip_list")
                    .num_columns(8)
                    .spacing([14.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        // Header
                        ui.label(RichText::new("তারিখ").strong());
                        ui.label(RichText::new("গাড়ি নং").strong());
                        ui.label(RichText::new("বিবরণ").strong());
                        ui.label(RichText::new("আয়").strong());
                        ui.label(RichText::new("মোট ব্যয়").strong());
                        ui.label(RichText::new("নিট লাভ").strong());
                        ui.label(RichText::new("ছবি").strong());
                        ui.label("");
                        ui.end_row();

                        for row in &rows {
                            let selected =
                                self.selected_id.as_deref() == Some(row.id.as_str());

                            ui.label(&row.date);
                            if ui
                                .selectable_label(selected, RichText::new(&row.truck_number))
                                .clicked()
                            {
                                self.selected_id = Some(row.id.clone());
                            }
                            ui.label(truncate(&row.description, 30));
                            ui.label(format!("{}{}", currency, row.income));
                            ui.label(format!("{}{}", currency, row.total_expense));
                            let profit_color = if row.net_profit >= 0.0 {
                                Color32::LIGHT_GREEN
                            } else {
                                Color32::LIGHT_RED
                            };
                            ui.label(
                                RichText::new(format!("{}{}", currency, row.net_profit))
                                    .color(profit_color),
                            );
                            ui.label(if row.has_photo { "📷" } else { "-" });

                            // Delete asks for confirmation first
                            if ui.small_button("ডিলিট").clicked() {
                                self.confirm_delete = Some(row.id.clone());
                            }
                            ui.end_row();
                        }
                    });
            });

        // Detail strip for the selected trip
        if let Some(selected_id) = self.selected_id.clone() {
            if let Some(trip) = store.get(&selected_id) {
                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&trip.truck_number).strong());
                    ui.label(
                        RichText::new(format!("আইডি: {}", trip.id))
                            .color(Color32::GRAY)
                            .small(),
                    );
                });
                if !trip.description.is_empty() {
                    ui.label(&trip.description);
                }

                let photo = trip.photo.clone();
                if let Some(photo) = photo {
                    if let Some(texture) = self.load_preview(ctx, &selected_id, &photo) {
                        let size = texture.size_vec2();
                        let scale = (120.0 / size.y).min(1.0);
                        ui.image((texture.id(), size * scale));
                    }
                }
            }
        }

        // Confirmation dialog
        if let Some(pending_id) = self.confirm_delete.clone() {
            egui::Window::new("নিশ্চিত করুন")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("আপনি কি নিশ্চিত যে এই ট্রিপটি ডিলিট করতে চান?");
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("হ্যাঁ, ডিলিট করুন").clicked() {
                            request_delete = Some(pending_id.clone());
                            self.confirm_delete = None;
                        }
                        if ui.button("বাতিল").clicked() {
                            self.confirm_delete = None;
                        }
                    });
                });
        }

        // Process confirmed deletion
        if let Some(id) = request_delete {
            match store.delete(&id) {
                Ok(true) => {
                    if self.selected_id.as_deref() == Some(id.as_str()) {
                        self.selected_id = None;
                    }
                    self.status_message = Some(("ট্রিপ ডিলিট হয়েছে".to_string(), false));
                }
                Ok(false) => {
                    self.status_message =
                        Some(("ট্রিপ পাওয়া যায়নি".to_string(), true));
                }
                Err(e) => {
                    self.status_message = Some((format!("ডিলিট ত্রুটি: {}", e), true));
                }
            }
        }

        if let Some((ref msg, is_error)) = self.status_message {
            ui.add_space(6.0);
            let color = if is_error {
                Color32::LIGHT_RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    }

    /// Decode the trip photo and cache it as a texture
    fn load_preview(
        &mut self,
        ctx: &egui::Context,
        trip_id: &str,
        photo_base64: &str,
    ) -> Option<&TextureHandle> {
        // Check if already loaded (cache hit)
        if self.preview_id.as_deref() == Some(trip_id) {
            return self.preview_texture.as_ref();
        }

        // Mark as loading to prevent re-processing
        self.preview_id = Some(trip_id.to_string());
        self.preview_texture = None;

        use base64::{engine::general_purpose::STANDARD, Engine};

        // Remove data URL prefix if present
        let data = if photo_base64.contains(',') {
            photo_base64.split(',').nth(1).unwrap_or(photo_base64)
        } else {
            photo_base64
        };

        if let Ok(bytes) = STANDARD.decode(data) {
            if let Ok(img) = image::load_from_memory(&bytes) {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();

                let color_image = ColorImage::from_rgba_unmultiplied(size, &pixels);

                let texture = ctx.load_texture(
                    format!("trip_photo_{}", trip_id),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );

                self.preview_texture = Some(texture);
            }
        }

        self.preview_texture.as_ref()
    }
}

fn to_row(trip: &khata_types::Trip) -> TripRow {
    TripRow {
        id: trip.id.clone(),
        date: trip.date.format("%Y-%m-%d").to_string(),
        truck_number: trip.truck_number.clone(),
        description: trip.description.clone(),
        income: trip.income,
        total_expense: trip.total_expense,
        net_profit: trip.net_profit,
        has_photo: trip.photo.is_some(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}…", truncated)
    }
}

impl Default for TripsPanel {
    fn default() -> Self {
        Self::new()
    }
}
