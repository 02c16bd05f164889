//! Form state and its submission lifecycle

use super::field::{FieldId, FIELD_COUNT};
#[cfg(test)]
use super::validation::ValidatedPayload;
use crate::state::{Classification, ErrorInfo, SubmitResult};
use chrono::{DateTime, Local};

/// Errors from illegal form operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("no submission in progress (status: {0:?})")]
    NotSubmitting(SubmitStatus),
}

/// Where the form is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Raw values of all thirteen fields plus the last submission outcome.
///
/// Values are only changed through [`FormState::set_field`]; the status
/// only through [`FormState::begin_submit`] and [`FormState::complete_submit`].
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: [String; FIELD_COUNT],
    status: SubmitStatus,
    result: Option<Classification>,
    error: Option<ErrorInfo>,
    completed_at: Option<DateTime<Local>>,
    dirty: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form with the given fields set, via [`FormState::set_field`]
    #[cfg(test)]
    pub fn with_values<'a>(values: impl IntoIterator<Item = (FieldId, &'a str)>) -> Self {
        let mut form = Self::new();
        for (id, raw) in values {
            form.set_field(id, raw);
        }
        form
    }

    /// Build a form pre-filled with the canonical text of a payload
    #[cfg(test)]
    pub fn from_payload(payload: &ValidatedPayload) -> Self {
        let mut form = Self::new();
        for (id, value) in payload.iter() {
            form.values[id.index()] = value.to_string();
        }
        form
    }

    pub fn value(&self, id: FieldId) -> &str {
        &self.values[id.index()]
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    pub fn result(&self) -> Option<Classification> {
        self.result
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    /// When the last submission finished
    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    /// Returns true once after any change, then resets
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replace the raw value of a field.
    ///
    /// An edit after a finished submission drops the old outcome so a
    /// stale prediction is never shown against new inputs.
    pub fn set_field(&mut self, id: FieldId, raw: impl Into<String>) {
        self.values[id.index()] = raw.into();
        if self.status.is_terminal() {
            self.clear_outcome();
            self.status = SubmitStatus::Idle;
        }
        self.dirty = true;
    }

    /// Replace a field by its wire name; unknown names leave the form untouched
    pub fn set_field_by_name(&mut self, name: &str, raw: impl Into<String>) -> Result<(), FormError> {
        let id: FieldId = name.parse()?;
        self.set_field(id, raw);
        Ok(())
    }

    /// Enter `Submitting`. Returns false (and changes nothing) when a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.clear_outcome();
        self.status = SubmitStatus::Submitting;
        self.dirty = true;
        true
    }

    /// Record the outcome of the in-flight submission
    pub fn complete_submit(&mut self, outcome: SubmitResult) -> Result<(), FormError> {
        if !self.is_submitting() {
            tracing::error!(status = ?self.status, "completion without a submission in flight");
            return Err(FormError::NotSubmitting(self.status));
        }

        match outcome {
            Ok(classification) => {
                self.status = SubmitStatus::Succeeded;
                self.result = Some(classification);
            }
            Err(error) => {
                self.status = SubmitStatus::Failed;
                self.error = Some(error);
            }
        }
        self.completed_at = Some(Local::now());
        self.dirty = true;
        Ok(())
    }

    /// Empty every field. The lifecycle is left alone while submitting.
    pub fn reset(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
        if !self.is_submitting() {
            self.clear_outcome();
            self.status = SubmitStatus::Idle;
        }
        self.dirty = true;
    }

    fn clear_outcome(&mut self) {
        self.result = None;
        self.error = None;
        self.completed_at = None;
    }
}
