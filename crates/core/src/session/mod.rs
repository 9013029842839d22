//! Market session clock and the countdown contract handed to clients.

mod countdown;
mod session_clock;
mod session_model;

pub use countdown::*;
pub use session_clock::*;
pub use session_model::*;
