//! Submission controller
//!
//! Validates the form, sends at most one request at a time and feeds the
//! outcome back into the form. Requests run on a spawned task so the UI
//! loop keeps handling edits; finished requests are collected with
//! [`SubmissionController::poll`] or [`SubmissionController::wait`].

use crate::service::PredictionService;
use crate::state::forms::{validate, FormState};
use crate::state::{ErrorInfo, SubmitResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

/// What a call to [`SubmissionController::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing changed
    Rejected,
    /// Local validation failed; the form now holds the violations
    Invalid,
    /// A request was sent
    Started(Uuid),
}

/// A finished request, sent back from the worker task
#[derive(Debug)]
struct Completion {
    id: Uuid,
    result: SubmitResult,
}

/// Drives the validate, send, interpret cycle for one form
pub struct SubmissionController {
    service: Arc<dyn PredictionService>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: Option<Uuid>,
}

impl SubmissionController {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            service,
            tx,
            rx,
            in_flight: None,
        }
    }

    /// Where requests are sent
    pub fn endpoint(&self) -> String {
        self.service.endpoint()
    }

    /// Id of the request currently in flight
    #[cfg(test)]
    pub fn in_flight(&self) -> Option<Uuid> {
        self.in_flight
    }

    /// Submit the form.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, form: &mut FormState) -> SubmitOutcome {
        if form.is_submitting() {
            tracing::debug!("submit ignored, request already in flight");
            return SubmitOutcome::Rejected;
        }

        let payload = match validate(form) {
            Ok(payload) => payload,
            Err(violations) => {
                tracing::info!(fields = violations.len(), "submission blocked by validation");
                form.begin_submit();
                if let Err(err) = form.complete_submit(Err(ErrorInfo::validation(violations))) {
                    tracing::error!(error = %err, "failed to record validation errors");
                }
                return SubmitOutcome::Invalid;
            }
        };

        form.begin_submit();
        let id = Uuid::new_v4();
        self.in_flight = Some(id);

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let span = tracing::info_span!("submission", %id);
        tokio::spawn(
            async move {
                tracing::info!("prediction request started");
                // Run the request on its own task so a panic still yields a completion
                let request =
                    tokio::spawn(async move { service.predict(&payload).await }.in_current_span());
                let result = request.await.unwrap_or_else(|err| {
                    tracing::error!(error = %err, "prediction task aborted");
                    Err(ErrorInfo::network(format!("Prediction request aborted: {err}")))
                });
                // The receiver lives as long as the controller
                let _ = tx.send(Completion { id, result });
            }
            .instrument(span),
        );

        SubmitOutcome::Started(id)
    }

    /// Apply any finished submissions without blocking.
    /// Returns true if the form changed.
    pub fn poll(&mut self, form: &mut FormState) -> bool {
        let mut applied = false;
        while let Ok(completion) = self.rx.try_recv() {
            applied |= self.apply(form, completion);
        }
        applied
    }

    /// Wait for the in-flight submission to finish and apply it.
    /// Returns false immediately when nothing is in flight.
    pub async fn wait(&mut self, form: &mut FormState) -> bool {
        if self.in_flight.is_none() {
            return false;
        }
        match self.rx.recv().await {
            Some(completion) => self.apply(form, completion),
            None => false,
        }
    }

    fn apply(&mut self, form: &mut FormState, completion: Completion) -> bool {
        if self.in_flight != Some(completion.id) {
            tracing::warn!(id = %completion.id, "dropping completion for unknown submission");
            return false;
        }
        self.in_flight = None;

        match &completion.result {
            Ok(classification) => {
                tracing::info!(id = %completion.id, ?classification, "prediction received")
            }
            Err(err) => tracing::warn!(id = %completion.id, kind = ?err.kind, "prediction failed: {}", err.message),
        }

        match form.complete_submit(completion.result) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "failed to record submission outcome");
                false
            }
        }
    }
}
