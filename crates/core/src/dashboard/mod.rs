//! Dashboard assembly - one consistent view per render.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;
mod links;

pub use dashboard_model::*;
pub use dashboard_service::*;
pub use dashboard_traits::*;
pub use links::*;
