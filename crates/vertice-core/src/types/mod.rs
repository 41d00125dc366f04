//! Domain types for market risk calculations.

mod confidence;
mod date;
mod instrument;
mod tenor;

pub use confidence::ConfidenceLevel;
pub use date::Date;
pub use instrument::{BondKind, FutureKind, Locale, OptionKind, RiskFactorKind};
pub use tenor::Tenor;
