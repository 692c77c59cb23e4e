//! Colors and font sizes for the ticker window

use eframe::egui::Color32;

use crate::render::ChangeTone;

pub struct Theme;

impl Theme {
    pub const BG_WINDOW: Color32 = Color32::from_rgb(30, 30, 30);
    pub const BG_PANEL: Color32 = Color32::from_rgb(40, 40, 40);
    pub const BG_CARD: Color32 = Color32::from_rgb(50, 50, 50);
    pub const BG_MENU: Color32 = Color32::from_rgb(50, 50, 50);

    pub const BORDER: Color32 = Color32::from_rgb(90, 90, 90);

    pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
    pub const TEXT_MENU: Color32 = Color32::LIGHT_GRAY;
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(140, 140, 140);

    pub const GREEN: Color32 = Color32::from_rgb(0, 128, 0);
    pub const RED: Color32 = Color32::from_rgb(255, 0, 0);

    /// Color of a card's change line
    pub fn tone_color(tone: ChangeTone) -> Color32 {
        match tone {
            ChangeTone::Gain => Self::GREEN,
            ChangeTone::Loss => Self::RED,
        }
    }
}

/// Font sizes in points
pub struct FontSize;

impl FontSize {
    pub const TITLE: f32 = 16.0;
    pub const BODY: f32 = 13.0;
    pub const SMALL: f32 = 11.0;
}
