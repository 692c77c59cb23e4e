//! Core data models and traits

mod price_record;
mod price_source;

pub use price_record::*;
pub use price_source::*;
