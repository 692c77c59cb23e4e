//! Card rendering - maps price records to the text and tone shown on each card

use crate::core::PriceRecord;
use crate::refresh::{PriceBoard, TickerState};

/// Color class of the 24h change line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTone {
    /// Change >= 0, drawn green
    Gain,
    /// Change < 0, drawn red
    Loss,
}

/// Display-ready contents of one card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Token id the card was rendered from
    pub token: String,
    pub title: String,
    pub price_text: String,
    pub change_text: String,
    pub tone: ChangeTone,
}

/// Render one price record as a card
pub fn render_card(record: &PriceRecord) -> Card {
    Card {
        token: record.token.clone(),
        title: capitalize(&record.token),
        price_text: format!("Price: ${:.2}", record.price),
        change_text: format!("24h Change: {:+.2}% (24h)", record.change_24h),
        tone: if record.is_gain() {
            ChangeTone::Gain
        } else {
            ChangeTone::Loss
        },
    }
}

/// Upper-case the first character ("bitcoin" -> "Bitcoin")
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Text of the banner shown with placeholder data
pub fn error_banner(error: &str) -> String {
    format!(
        "Error fetching prices\nUsing placeholder data for now.\nError: {}",
        error
    )
}

/// Cards currently shown by the widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub cards: Vec<Card>,
    pub banner: Option<String>,
}

impl Panel {
    /// One zero-valued card per configured token, shown until the first tick
    pub fn initial(tokens: &[String]) -> Self {
        Self {
            cards: tokens
                .iter()
                .map(|t| render_card(&PriceRecord::empty(t.as_str())))
                .collect(),
            banner: None,
        }
    }

    /// Show a new board.
    ///
    /// Live boards for the same tokens update the existing cards in place.
    /// Placeholder boards, or live boards for a different token list (e.g. the
    /// first success after placeholders), rebuild the whole panel.
    pub fn apply(&mut self, board: &PriceBoard) {
        match board.state {
            TickerState::Normal if self.matches(&board.records) => {
                for (card, record) in self.cards.iter_mut().zip(&board.records) {
                    let fresh = render_card(record);
                    card.price_text = fresh.price_text;
                    card.change_text = fresh.change_text;
                    card.tone = fresh.tone;
                }
                self.banner = None;
            }
            TickerState::Normal => {
                self.cards = board.records.iter().map(render_card).collect();
                self.banner = None;
            }
            TickerState::Degraded => {
                self.cards = board.records.iter().map(render_card).collect();
                self.banner = Some(error_banner(board.error.as_deref().unwrap_or("unknown")));
            }
        }
    }

    fn matches(&self, records: &[PriceRecord]) -> bool {
        self.banner.is_none()
            && self.cards.len() == records.len()
            && self.cards.iter().zip(records).all(|(c, r)| c.token == r.token)
    }
}
