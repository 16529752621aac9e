//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use eframe::egui;

/// Render a flame + "N day streak" label. Dimmed at zero.
pub fn streak_badge(ui: &mut egui::Ui, days: u32) {
    let (icon_color, text_color) = if days > 0 {
        (theme::STREAK_ACTIVE, theme::TEXT_SECONDARY)
    } else {
        (theme::TEXT_DIM, theme::TEXT_DIM)
    };
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.add(
            egui::Label::new(
                egui::RichText::new(egui_phosphor::regular::FIRE)
                    .size(theme::FONT_BODY)
                    .color(icon_color),
            )
            .selectable(false),
        );
        let label = if days == 1 {
            "1 day streak".to_string()
        } else {
            format!("{} day streak", days)
        };
        ui.add(
            egui::Label::new(
                egui::RichText::new(label)
                    .size(theme::FONT_LABEL)
                    .color(text_color),
            )
            .selectable(false),
        );
    });
}

/// Render a rounded badge chip
pub fn badge_chip(ui: &mut egui::Ui, name: &str) {
    egui::Frame::new()
        .fill(theme::ACCENT_MUTED)
        .corner_radius(theme::RADIUS_LARGE)
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(name)
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
        });
}

/// Modal header close button (✕). Returns true when clicked.
pub fn close_button(ui: &mut egui::Ui) -> bool {
    let close_size = 24.0;
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(close_size, close_size), egui::Sense::click());
    let close_color = if response.hovered() {
        ui.painter().rect_filled(rect, 4.0, theme::BG_SURFACE);
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        theme::STATUS_ERROR
    } else {
        theme::TEXT_DIM
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::X,
        egui::FontId::proportional(16.0),
        close_color,
    );
    response.clicked()
}
