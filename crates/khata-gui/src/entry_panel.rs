//! Trip entry form panel

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::NaiveDate;
use eframe::egui::{self, Color32, ColorImage, RichText, TextureHandle};
use khata_app::Config;
use khata_store::TripStore;
use khata_types::TripDraft;

/// Panel for recording a new trip
pub struct EntryPanel {
    /// Trip date as YYYY-MM-DD
    date_input: String,
    /// Truck registration number
    truck_input: String,
    /// Fare received
    income_input: String,
    /// Driver allowance
    allowance_input: String,
    /// Fuel cost
    fuel_input: String,
    /// Other expenses
    other_input: String,
    /// Free-text description
    description_input: String,
    /// Attached photo as a base64 data string
    photo: Option<String>,
    /// Preview texture for the attached photo
    photo_texture: Option<TextureHandle>,
    /// Validation / IO error shown under the form
    error_message: Option<String>,
    /// Set when the form wants to return to the dashboard (save or cancel)
    navigate_back: bool,
}

impl EntryPanel {
    /// Create a new entry panel with today's date prefilled
    pub fn new() -> Self {
        Self {
            date_input: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
            truck_input: String::new(),
            income_input: String::new(),
            allowance_input: String::new(),
            fuel_input: String::new(),
            other_input: String::new(),
            description_input: String::new(),
            photo: None,
            photo_texture: None,
            error_message: None,
            navigate_back: false,
        }
    }

    /// True once after a save or cancel; the app switches tab on it
    pub fn take_navigate_back(&mut self) -> bool {
        std::mem::take(&mut self.navigate_back)
    }

    /// Render the panel UI
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        store: &mut TripStore,
        config: &Config,
    ) {
        ui.heading("নতুন ট্রিপ এন্ট্রি করুন");
        ui.label(
            RichText::new("ট্রাকের ভাড়া ও খরচের সঠিক তথ্য দিন")
                .color(Color32::GRAY)
                .small(),
        );
        ui.separator();
        ui.add_space(8.0);

        egui::Grid::new("entry_form")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                ui.label("তারিখ:");
                ui.text_edit_singleline(&mut self.date_input);
                ui.end_row();

                ui.label("গাড়ির নাম্বার:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.truck_input)
                        .hint_text("ঢাকা মেট্রো-ট ১১-২২৩৩"),
                );
                ui.end_row();

                ui.label("মোট ভাড়া (আয়):");
                ui.add(egui::TextEdit::singleline(&mut self.income_input).hint_text("0.00"));
                ui.end_row();

                ui.label("ড্রাইভারের খোরাকি:");
                ui.add(egui::TextEdit::singleline(&mut self.allowance_input).hint_text("0.00"));
                ui.end_row();

                ui.label("তেল খরচ:");
                ui.add(egui::TextEdit::singleline(&mut self.fuel_input).hint_text("0.00"));
                ui.end_row();

                ui.label("অন্যান্য খরচ:");
                ui.add(egui::TextEdit::singleline(&mut self.other_input).hint_text("0.00"));
                ui.end_row();

                ui.label("বিবরণ:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.description_input)
                        .hint_text("ঢাকা টু চট্টগ্রাম - মাল লোড"),
                );
                ui.end_row();
            });

        ui.add_space(10.0);

        // Photo attachment
        ui.horizontal(|ui| {
            if ui.button("ট্রিপের ছবি যোগ করুন...").clicked() {
                self.pick_photo(ctx);
            }
            if self.photo.is_some() && ui.button("ছবি বাদ দিন").clicked() {
                self.photo = None;
                self.photo_texture = None;
            }
        });
        if let Some(ref texture) = self.photo_texture {
            let size = texture.size_vec2();
            let scale = (140.0 / size.y).min(1.0);
            ui.image((texture.id(), size * scale));
        }

        ui.add_space(12.0);

        // Live totals, the form footer of the old app
        let total_expense = parse_amount(&self.allowance_input)
            + parse_amount(&self.fuel_input)
            + parse_amount(&self.other_input);
        let net_profit = parse_amount(&self.income_input) - total_expense;
        let currency = config.currency.as_str();

        egui::Frame::new()
            .fill(Color32::from_gray(30))
            .inner_margin(12.0)
            .corner_radius(6.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("মোট খরচ:").color(Color32::GRAY));
                    ui.label(
                        RichText::new(format!("{}{}", currency, total_expense))
                            .color(Color32::LIGHT_RED),
                    );
                    ui.add_space(24.0);
                    ui.label(RichText::new("নিট লাভ:").color(Color32::GRAY));
                    let profit_color = if net_profit >= 0.0 {
                        Color32::LIGHT_GREEN
                    } else {
                        Color32::LIGHT_RED
                    };
                    ui.label(
                        RichText::new(format!("{}{}", currency, net_profit)).color(profit_color),
                    );
                });
            });

        ui.add_space(12.0);

        ui.horizontal(|ui| {
            if ui
                .button(RichText::new("সেভ করুন").size(16.0))
                .clicked()
            {
                self.submit(store);
            }
            if ui.button("বাতিল").clicked() {
                self.reset();
                self.navigate_back = true;
            }
        });

        if let Some(ref msg) = self.error_message {
            ui.add_space(8.0);
            ui.label(RichText::new(msg).color(Color32::LIGHT_RED));
        }
    }

    /// Validate inputs and add the trip to the ledger
    fn submit(&mut self, store: &mut TripStore) {
        let Ok(date) = NaiveDate::parse_from_str(self.date_input.trim(), "%Y-%m-%d") else {
            self.error_message = Some("তারিখ সঠিক নয় (YYYY-MM-DD)".to_string());
            return;
        };

        let draft = TripDraft {
            date,
            truck_number: self.truck_input.trim().to_string(),
            income: parse_amount(&self.income_input),
            driver_allowance: parse_amount(&self.allowance_input),
            fuel_cost: parse_amount(&self.fuel_input),
            other_expenses: parse_amount(&self.other_input),
            description: self.description_input.trim().to_string(),
            photo: self.photo.clone(),
        };

        match store.add(draft) {
            Ok(_) => {
                self.reset();
                self.navigate_back = true;
            }
            Err(khata_types::Error::Validation(_)) => {
                // the old app's alert text
                self.error_message =
                    Some("দয়া করে গাড়ি নং এবং ভাড়া সঠিকভাবে লিখুন".to_string());
            }
            Err(e) => {
                self.error_message = Some(format!("সংরক্ষণ ত্রুটি: {}", e));
            }
        }
    }

    /// Pick an image file and embed it as a base64 data string
    fn pick_photo(&mut self, ctx: &egui::Context) {
        let file = rfd::FileDialog::new()
            .add_filter("ছবি", &["png", "jpg", "jpeg", "webp"])
            .pick_file();

        let Some(path) = file else {
            return;
        };

        match std::fs::read(&path) {
            Ok(bytes) => match image::load_from_memory(&bytes) {
                Ok(img) => {
                    let mime = image::guess_format(&bytes)
                        .map(|f| f.to_mime_type())
                        .unwrap_or("image/jpeg");
                    self.photo = Some(format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)));

                    let rgba = img.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let color_image = ColorImage::from_rgba_unmultiplied(size, &rgba.into_raw());
                    self.photo_texture = Some(ctx.load_texture(
                        "entry_photo",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                    self.error_message = None;
                }
                Err(_) => {
                    self.error_message = Some("ছবির ফাইল পড়া যায়নি".to_string());
                }
            },
            Err(e) => {
                self.error_message = Some(format!("ফাইল ত্রুটি: {}", e));
            }
        }
    }

    /// Clear the form back to its initial state
    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Parse a currency field; empty or malformed input counts as zero,
/// matching the old app's numeric inputs
fn parse_amount(input: &str) -> f64 {
    input.trim().parse().unwrap_or(0.0)
}

impl Default for EntryPanel {
    fn default() -> Self {
        Self::new()
    }
}
