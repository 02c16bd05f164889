//! Form rendering module
//!
//! - `field_renderer`: a single labeled numeric input
//! - `prediction_form`: the input grid and the action panel

mod field_renderer;
mod prediction_form;

pub use prediction_form::{draw_action_panel, draw_form};
