//! Prediction service module for HTTP communication

mod client;
mod traits;

pub use client::HttpPredictionClient;
pub use traits::PredictionService;

#[cfg(test)]
pub use traits::MockPredictionService;
