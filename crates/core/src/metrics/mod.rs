//! Portfolio metrics derived from a snapshot.

mod metrics_deriver;
mod metrics_model;

pub use metrics_deriver::*;
pub use metrics_model::*;
