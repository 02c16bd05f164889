//! Trait abstraction for the prediction service to enable mocking in tests

use crate::state::forms::ValidatedPayload;
use crate::state::SubmitResult;
use async_trait::async_trait;

/// A remote classifier for the thirteen clinical measurements
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Send one payload and normalize whatever comes back.
    ///
    /// Every failure mode is folded into the returned `ErrorInfo`;
    /// implementations never retry.
    async fn predict(&self, payload: &ValidatedPayload) -> SubmitResult;

    /// Where requests go, for display
    fn endpoint(&self) -> String;
}
