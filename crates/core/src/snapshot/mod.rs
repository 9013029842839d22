//! Dashboard snapshot - the parsed state of one render.

mod meta_loader;
mod snapshot_model;
mod snapshot_store;
mod snapshot_traits;

pub use meta_loader::*;
pub use snapshot_model::*;
pub use snapshot_store::*;
pub use snapshot_traits::*;
