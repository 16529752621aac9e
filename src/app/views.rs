//! Main window rendering (header, devotion card, progress card)

use super::App;
use crate::app::ProgressState;
use crate::theme;
use crate::ui::components::{badge_chip, streak_badge};
use crate::utils;
use eframe::egui;

impl App {
    pub fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                // Header bar
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("DEVOTION COMPANION")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(egui::Button::new(egui_phosphor::regular::GEAR).frame(false))
                            .on_hover_text("Settings")
                            .clicked()
                        {
                            self.show_settings = !self.show_settings;
                        }
                    });
                });

                ui.add_space(theme::SPACING_SM);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(utils::today_heading())
                            .size(theme::FONT_TITLE)
                            .strong(),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_LG);

                self.render_devotion_card(ui, ctx);
                ui.add_space(theme::SPACING_MD);
                self.render_progress_card(ui, ctx);
            });
    }

    fn render_devotion_card(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.colored_label(theme::ACCENT, egui_phosphor::regular::BOOK_OPEN);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Daily Devotion")
                            .size(theme::FONT_HEADING)
                            .strong(),
                    )
                    .selectable(false),
                );
            });
            ui.add_space(theme::SPACING_XS);
            ui.label(
                egui::RichText::new("A few quiet minutes with today's passage.")
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
            );
            ui.add_space(theme::SPACING_MD);
            let open_btn = ui.add(theme::button_accent(format!(
                "{}  Open Today's Devotion",
                egui_phosphor::regular::BOOK_OPEN
            )));
            if open_btn.clicked() {
                self.devotion.open(&self.api, &self.runtime, ctx);
            }
        });
    }

    fn render_progress_card(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let state = self.progress.state().clone();

        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.colored_label(theme::ACCENT, egui_phosphor::regular::CHART_LINE_UP);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("Your Journey")
                            .size(theme::FONT_HEADING)
                            .strong(),
                    )
                    .selectable(false),
                );
            });
            ui.add_space(theme::SPACING_SM);

            match state {
                ProgressState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(
                            egui::RichText::new("Loading progress...").color(theme::TEXT_MUTED),
                        );
                    });
                }
                ProgressState::Failed => {
                    ui.horizontal(|ui| {
                        ui.colored_label(theme::STATUS_ERROR, egui_phosphor::regular::WARNING);
                        ui.label(
                            egui::RichText::new("Couldn't load your progress.")
                                .color(theme::TEXT_MUTED),
                        );
                    });
                    ui.add_space(theme::SPACING_SM);
                    if ui
                        .add(theme::button(format!(
                            "{}  Retry",
                            egui_phosphor::regular::ARROW_CLOCKWISE
                        )))
                        .clicked()
                    {
                        self.progress.refresh(&self.api, &self.runtime, ctx);
                    }
                }
                ProgressState::Loaded(progress) => {
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&progress.level)
                                    .size(theme::FONT_BODY)
                                    .strong(),
                            )
                            .selectable(false),
                        );
                        ui.label(
                            egui::RichText::new(format!("{} XP", progress.xp))
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                        );
                    });
                    ui.add_space(theme::SPACING_SM);

                    let bar = egui::ProgressBar::new(progress.progress_percentage / 100.0)
                        .desired_width(ui.available_width())
                        .corner_radius(3.0)
                        .fill(theme::ACCENT);
                    ui.add(bar);
                    ui.label(
                        egui::RichText::new(format!("Next: {}", progress.next_level))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                    ui.add_space(theme::SPACING_MD);

                    ui.horizontal(|ui| {
                        streak_badge(ui, progress.streaks.devotion);
                        ui.add_space(theme::SPACING_MD);
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(egui_phosphor::regular::HANDS_PRAYING)
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "{} prayer streak",
                                progress.streaks.prayer
                            ))
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_MUTED),
                        );
                    });

                    if !progress.badges.is_empty() {
                        ui.add_space(theme::SPACING_MD);
                        ui.horizontal(|ui| {
                            ui.colored_label(theme::STREAK_ACTIVE, egui_phosphor::regular::MEDAL);
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new("BADGES")
                                        .size(theme::FONT_SECTION)
                                        .color(theme::TEXT_DIM),
                                )
                                .selectable(false),
                            );
                        });
                        ui.add_space(theme::SPACING_XS);
                        ui.horizontal_wrapped(|ui| {
                            ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
                            for badge in &progress.badges {
                                badge_chip(ui, badge);
                            }
                        });
                    }
                }
            }
        });
    }
}
