//! Modal dialogs (devotion modal, settings modal)

use super::App;
use crate::constants::{APP_VERSION, DEFAULT_XP_REWARD};
use crate::theme;
use crate::types::{Devotion, DevotionResponse, ModalState};
use crate::ui::components::{close_button, streak_badge};
use crate::utils;
use eframe::egui;

impl App {
    // ========================================================================
    // DEVOTION MODAL
    // ========================================================================

    pub fn render_devotion_modal(&mut self, ctx: &egui::Context) {
        if !self.devotion.state().is_open() {
            return;
        }
        let state = self.devotion.state().clone();

        let modal = egui::Modal::new(egui::Id::new("devotion_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(380.0);
            ui.set_max_width(380.0);

            let title = match &state {
                ModalState::Loaded(DevotionResponse::AlreadyCompleted { devotion_type, .. })
                | ModalState::Loaded(DevotionResponse::Pending { devotion_type, .. }) => {
                    utils::devotion_title(devotion_type.as_deref())
                }
                _ => "Daily Devotion",
            };

            // Title bar with close button
            ui.horizontal(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(title).size(theme::FONT_HEADING).strong(),
                    )
                    .selectable(false),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if close_button(ui) {
                        self.devotion.close();
                    }
                });
            });
            ui.add_space(theme::SPACING_SM);
            ui.separator();
            ui.add_space(theme::SPACING_MD);

            match state {
                ModalState::Closed => {}
                ModalState::Loading => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.spinner();
                        ui.add_space(theme::SPACING_SM);
                        ui.label(egui::RichText::new("Loading...").color(theme::TEXT_MUTED));
                        ui.add_space(24.0);
                    });
                }
                ModalState::Failed => self.render_fetch_error(ui),
                ModalState::Loaded(DevotionResponse::AlreadyCompleted {
                    message, streak, ..
                }) => self.render_already_completed(ui, &message, streak),
                ModalState::Loaded(DevotionResponse::Pending {
                    devotion,
                    current_streak,
                    ..
                }) => self.render_pending_devotion(ui, ctx, &devotion, current_streak),
            }
        });

        // Backdrop click or escape
        if modal_response.should_close() {
            self.devotion.close();
        }
    }

    fn render_fetch_error(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(egui_phosphor::regular::WARNING)
                    .size(32.0)
                    .color(theme::STATUS_ERROR),
            );
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new("Failed to load devotion. Please try again.")
                    .color(theme::TEXT_MUTED),
            );
            ui.add_space(theme::SPACING_XL);
            if ui
                .add(theme::button(format!("{}  Close", egui_phosphor::regular::X)))
                .clicked()
            {
                self.devotion.close();
            }
        });
    }

    fn render_already_completed(&mut self, ui: &mut egui::Ui, message: &str, streak: u32) {
        ui.vertical_centered(|ui| {
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                    .size(36.0)
                    .color(theme::STATUS_SUCCESS),
            );
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new("Devotion Complete!")
                    .size(theme::FONT_HEADING)
                    .strong(),
            );
            ui.add_space(theme::SPACING_SM);
            ui.label(egui::RichText::new(message).color(theme::TEXT_MUTED));
            ui.add_space(theme::SPACING_SM);
            streak_badge(ui, streak);
            ui.add_space(theme::SPACING_XL);
            if ui
                .add(theme::button(format!("{}  Close", egui_phosphor::regular::X)))
                .clicked()
            {
                self.devotion.close();
            }
        });
    }

    fn render_pending_devotion(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        devotion: &Devotion,
        current_streak: u32,
    ) {
        ui.label(
            egui::RichText::new(&devotion.passage)
                .size(theme::FONT_BODY)
                .strong()
                .color(theme::ACCENT),
        );
        ui.add_space(theme::SPACING_SM);

        // Quoted verse
        egui::Frame::new()
            .fill(theme::BG_ELEVATED)
            .corner_radius(theme::RADIUS_DEFAULT)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(
                    egui::RichText::new(format!("\u{201c}{}\u{201d}", devotion.text))
                        .size(theme::FONT_BODY)
                        .italics()
                        .color(theme::TEXT_SECONDARY),
                );
            });
        ui.add_space(theme::SPACING_MD);

        ui.label(egui::RichText::new(&devotion.insight).size(theme::FONT_LABEL));
        ui.add_space(theme::SPACING_MD);

        ui.horizontal_wrapped(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Reflection:").size(theme::FONT_LABEL).strong(),
                )
                .selectable(false),
            );
            ui.label(
                egui::RichText::new(&devotion.reflection)
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_SECONDARY),
            );
        });
        ui.add_space(theme::SPACING_SM);

        theme::input_frame().show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(self.devotion.reflection_input_mut())
                    .hint_text("Share your thoughts...")
                    .frame(false)
                    .desired_rows(3)
                    .desired_width(ui.available_width()),
            );
        });

        if current_streak > 0 {
            ui.add_space(theme::SPACING_SM);
            streak_badge(ui, current_streak);
        }
        ui.add_space(theme::SPACING_LG);

        ui.horizontal(|ui| {
            ui.set_min_height(28.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.devotion.is_submitting() {
                    ui.spinner();
                    ui.label(egui::RichText::new("Completing...").color(theme::TEXT_MUTED));
                } else {
                    let complete_btn = ui.add(theme::button_accent(format!(
                        "{}  Complete (+{} XP)",
                        egui_phosphor::regular::CHECK,
                        DEFAULT_XP_REWARD
                    )));
                    if complete_btn.clicked() {
                        self.devotion.complete(&self.api, &self.runtime, ctx);
                    }
                    ui.add_space(theme::SPACING_MD);
                    if ui
                        .add(theme::button(format!("{}  Cancel", egui_phosphor::regular::X)))
                        .clicked()
                    {
                        self.devotion.close();
                    }
                }
            });
        });
    }

    // ========================================================================
    // SETTINGS MODAL
    // ========================================================================

    pub fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_width(320.0);

            ui.horizontal(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Settings").size(theme::FONT_HEADING).strong(),
                    )
                    .selectable(false),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if close_button(ui) {
                        self.show_settings = false;
                    }
                });
            });
            ui.add_space(theme::SPACING_SM);
            ui.separator();
            ui.add_space(theme::SPACING_SM);

            // — Server —
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Server")
                        .size(theme::FONT_LABEL)
                        .color(theme::ACCENT),
                )
                .selectable(false),
            );
            ui.add_space(theme::SPACING_XS);
            let url_resp = theme::input_frame()
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.server_url_input)
                            .frame(false)
                            .desired_width(ui.available_width())
                            .font(egui::FontId::proportional(theme::FONT_LABEL)),
                    )
                })
                .inner;
            if url_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.apply_server_url(ctx);
            }
            ui.label(
                egui::RichText::new("Where your devotion server lives. Press Enter to apply.")
                    .size(theme::FONT_CAPTION)
                    .color(theme::TEXT_DIM),
            );

            ui.add_space(theme::SPACING_MD);
            ui.separator();
            ui.add_space(theme::SPACING_SM);

            // — Logs —
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Logs")
                        .size(theme::FONT_LABEL)
                        .color(theme::ACCENT),
                )
                .selectable(false),
            );
            ui.add_space(theme::SPACING_XS);
            if ui
                .add(theme::button(format!(
                    "{}  Open Logs Folder",
                    egui_phosphor::regular::FOLDER_OPEN
                )))
                .clicked()
            {
                let logs_dir = self.data_dir.join("logs");
                std::fs::create_dir_all(&logs_dir).ok();
                let _ = open::that(&logs_dir);
            }

            ui.add_space(theme::SPACING_MD);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("v{}", APP_VERSION))
                        .size(theme::FONT_CAPTION)
                        .color(theme::TEXT_DIM),
                );
            });
        });

        if modal_response.should_close() {
            self.show_settings = false;
        }
    }
}
