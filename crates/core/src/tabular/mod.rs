//! Tabular data - header-keyed records read from the engine's CSV exports.

mod record;
mod tabular_parser;

pub use record::*;
pub use tabular_parser::*;
