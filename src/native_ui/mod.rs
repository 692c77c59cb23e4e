//! Native egui-based ticker window
//!
//! One fixed-width window with a menu bar and a vertical stack of price cards

mod app;
mod layout;
mod theme;

pub use app::run;
