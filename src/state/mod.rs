//! Application state module

mod app_state;
mod classification;
pub mod forms;
mod outcome;

pub use app_state::*;
pub use classification::*;
pub use outcome::*;
