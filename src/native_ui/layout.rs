//! Fixed pixel layout of the ticker window

pub const FORM_WIDTH: f32 = 350.0;
pub const CARD_HEIGHT: f32 = 90.0;
pub const CARD_MARGIN: f32 = 5.0;
pub const PADDING_TOP: f32 = 35.0;
pub const PADDING_BOTTOM: f32 = 45.0;
pub const PADDING_LEFT: f32 = 10.0;
pub const PADDING_RIGHT: f32 = 25.0;
pub const MENU_HEIGHT: f32 = 30.0;

/// Extra room for the three-line error banner
pub const BANNER_HEIGHT: f32 = 60.0;

/// Width available to a card inside the panel padding
pub fn card_width() -> f32 {
    FORM_WIDTH - PADDING_LEFT - PADDING_RIGHT
}

/// Window height needed to show `cards` cards
pub fn window_height(cards: usize, with_banner: bool) -> f32 {
    let banner = if with_banner { BANNER_HEIGHT } else { 0.0 };
    cards as f32 * CARD_HEIGHT + PADDING_TOP + PADDING_BOTTOM + MENU_HEIGHT + banner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_height() {
        assert_eq!(window_height(3, false), 380.0);
        assert_eq!(window_height(0, false), 110.0);
        assert_eq!(window_height(3, true), 440.0);
    }

    #[test]
    fn test_card_width() {
        assert_eq!(card_width(), 315.0);
    }
}
