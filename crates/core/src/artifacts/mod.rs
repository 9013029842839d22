//! Artifact discovery - finding the newest data files dropped by the trading engine.

mod artifact_locator;
mod artifacts_model;

pub use artifact_locator::*;
pub use artifacts_model::*;
