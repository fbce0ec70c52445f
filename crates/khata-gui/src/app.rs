//! Main application structure with tab navigation

use eframe::egui;
use khata_app::Config;
use khata_store::TripStore;

use crate::analytics_panel::AnalyticsPanel;
use crate::dashboard_panel::DashboardPanel;
use crate::entry_panel::EntryPanel;
use crate::trips_panel::TripsPanel;

/// Application tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Trips,
    Entry,
    Analytics,
}

impl Tab {
    /// Get the Bengali label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "ড্যাশবোর্ড",
            Tab::Trips => "ট্রিপের তালিকা",
            Tab::Entry => "নতুন ট্রিপ",
            Tab::Analytics => "গাড়ি রিপোর্ট",
        }
    }
}

/// Main application state
pub struct KhataApp {
    /// Currently selected tab
    current_tab: Tab,
    /// Dashboard panel state
    dashboard_panel: DashboardPanel,
    /// Trip list panel state
    trips_panel: TripsPanel,
    /// Entry form panel state
    entry_panel: EntryPanel,
    /// Analytics panel state
    analytics_panel: AnalyticsPanel,
    /// Application configuration
    config: Config,
    /// Persistent trip ledger
    store: TripStore,
}

impl KhataApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Setup Bengali fonts
        let mut fonts = egui::FontDefinitions::default();

        // Try to load system Bengali font
        if let Some(font_data) = Self::load_system_font() {
            fonts.font_data.insert(
                "bengali".to_owned(),
                egui::FontData::from_owned(font_data).into(),
            );

            // Add Bengali font as primary for proportional text
            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .insert(0, "bengali".to_owned());

            // Also for monospace
            fonts
                .families
                .entry(egui::FontFamily::Monospace)
                .or_default()
                .insert(0, "bengali".to_owned());
        }

        cc.egui_ctx.set_fonts(fonts);

        // Load configuration
        let config = Config::load().unwrap_or_default();

        // Open the trip ledger
        let data_dir = config
            .data_dir()
            .unwrap_or_else(|_| std::env::temp_dir().join("truck-khata"));
        let store = TripStore::open(data_dir).unwrap_or_else(|_| {
            // Fallback to temp directory if the ledger fails to open
            let fallback_dir = std::env::temp_dir().join("truck-khata-fallback");
            TripStore::open(fallback_dir).expect("Failed to create fallback store")
        });

        Self {
            current_tab: Tab::default(),
            dashboard_panel: DashboardPanel::new(),
            trips_panel: TripsPanel::new(),
            entry_panel: EntryPanel::new(),
            analytics_panel: AnalyticsPanel::new(),
            config,
            store,
        }
    }

    /// Load a system font covering Bengali script
    fn load_system_font() -> Option<Vec<u8>> {
        let font_paths = [
            // Windows
            "C:/Windows/Fonts/Nirmala.ttf",   // Nirmala UI
            "C:/Windows/Fonts/vrinda.ttf",    // Vrinda
            // Linux (Noto)
            "/usr/share/fonts/truetype/noto/NotoSansBengali-Regular.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansBengali-Regular.ttf",
        ];

        for path in &font_paths {
            if let Ok(data) = std::fs::read(path) {
                return Some(data);
            }
        }
        None
    }

    /// Render the tab bar
    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            for tab in [Tab::Dashboard, Tab::Trips, Tab::Entry, Tab::Analytics] {
                let selected = self.current_tab == tab;
                if ui.selectable_label(selected, tab.label()).clicked() {
                    self.current_tab = tab;
                }
                ui.add_space(8.0);
            }
        });
    }
}

impl eframe::App for KhataApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel with tab bar
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        // Central panel with selected tab content
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.current_tab {
                Tab::Dashboard => {
                    self.dashboard_panel.ui(ui, &self.store, &self.config);
                }
                Tab::Trips => {
                    self.trips_panel.ui(ui, ctx, &mut self.store, &self.config);
                }
                Tab::Entry => {
                    self.entry_panel.ui(ui, ctx, &mut self.store, &self.config);
                    // Saved or cancelled entries navigate back to the dashboard
                    if self.entry_panel.take_navigate_back() {
                        self.current_tab = Tab::Dashboard;
                    }
                }
                Tab::Analytics => {
                    self.analytics_panel.ui(ui, &self.store, &self.config);
                }
            }
        });
    }
}
