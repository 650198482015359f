//! Colours and the global egui style for the mint page.

use eframe::egui;

pub const PAGE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(15, 23, 42);
pub const HEADER_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(11, 17, 32);
pub const CARD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(51, 65, 85);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(20, 184, 166);
pub const ACCENT_DARK: egui::Color32 = egui::Color32::from_rgb(13, 148, 136);
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);
pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
pub const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(20, 53, 40);
pub const ERROR: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);
pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
pub const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = PAGE_BACKGROUND;
    visuals.window_fill = CARD_BACKGROUND;
    visuals.window_stroke = egui::Stroke::new(1.0, CARD_STROKE);
    visuals.override_text_color = Some(TEXT);
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT_DARK;

    visuals.widgets.inactive.weak_bg_fill = ACCENT_DARK;
    visuals.widgets.inactive.bg_fill = ACCENT_DARK;
    visuals.widgets.hovered.weak_bg_fill = ACCENT;
    visuals.widgets.hovered.bg_fill = ACCENT;
    visuals.widgets.active.weak_bg_fill = ACCENT;
    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, CARD_STROKE);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.2, ACCENT.gamma_multiply(0.9));

    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.interact_size = egui::vec2(40.0, 32.0);
    ctx.set_style(style);
}
