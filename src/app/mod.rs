//! App module - contains the main application state and logic

mod devotion;
mod modals;
mod progress;
mod views;

pub use devotion::{DevotionModal, DialogNotifier, Notifier};
pub use progress::{ProgressPanel, ProgressState};

use crate::api::ApiClient;
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) api: ApiClient,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Devotion modal
    pub(crate) devotion: DevotionModal,
    // Progress overview
    pub(crate) progress: ProgressPanel,
    pub(crate) startup_fetch_done: bool,
    // Settings modal
    pub(crate) show_settings: bool,
    pub(crate) server_url_input: String,
    // Window state
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let server_url = settings.server_url_or_default();

        Self {
            api: ApiClient::new(server_url.clone()),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            devotion: DevotionModal::new(Box::new(DialogNotifier)),
            progress: ProgressPanel::new(),
            startup_fetch_done: false,
            show_settings: false,
            server_url_input: server_url,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            server_url: Some(self.api.base_url().to_string()),
        };
        settings.save(&self.data_dir);
    }

    /// Apply an edited server URL from the settings modal. A blank field
    /// falls back to the default; the progress card refreshes against the
    /// new server.
    pub fn apply_server_url(&mut self, ctx: &egui::Context) {
        let entered = self.server_url_input.trim();
        let url = if entered.is_empty() {
            crate::constants::DEFAULT_SERVER_URL.to_string()
        } else {
            entered.trim_end_matches('/').to_string()
        };
        if url != self.api.base_url() {
            self.api.set_base_url(url.clone());
            self.server_url_input = url;
            self.save_settings();
            self.progress.refresh(&self.api, &self.runtime, ctx);
        }
    }
}
