//! Price source implementations

mod coingecko;

pub use coingecko::*;
