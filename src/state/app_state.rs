//! Application state definitions

use super::forms::{definition_for, FieldId, FieldKind, FormState, FIELD_COUNT};
use std::collections::VecDeque;

/// Buttons in the action panel, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionButton {
    #[default]
    Submit,
    Clear,
    Quit,
}

impl ActionButton {
    pub const ALL: [ActionButton; 3] = [Self::Submit, Self::Clear, Self::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Predict",
            Self::Clear => "Clear",
            Self::Quit => "Quit",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Submit => Self::Clear,
            Self::Clear => Self::Quit,
            Self::Quit => Self::Submit,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Submit => Self::Quit,
            Self::Clear => Self::Submit,
            Self::Quit => Self::Clear,
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// The prediction form
    pub form: FormState,
    /// Focused row: `0..FIELD_COUNT` are inputs, `FIELD_COUNT` is the action panel
    pub active_form_field: usize,
    /// Selected button when the action panel is focused
    pub selected_button: ActionButton,
    /// Errors waiting to be shown in the dialog, oldest first
    pub error_queue: VecDeque<String>,
    /// Transient status line message
    pub status_message: Option<String>,
}

impl AppState {
    /// Number of focusable rows (inputs plus the action panel)
    pub fn form_field_count(&self) -> usize {
        FIELD_COUNT + 1
    }

    /// Move to next form field
    pub fn next_form_field(&mut self) {
        self.active_form_field = (self.active_form_field + 1) % self.form_field_count();
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        if self.active_form_field == 0 {
            self.active_form_field = self.form_field_count() - 1;
        } else {
            self.active_form_field -= 1;
        }
    }

    /// The focused input, or `None` when the action panel has focus
    pub fn active_field_id(&self) -> Option<FieldId> {
        FieldId::from_index(self.active_form_field)
    }

    pub fn is_action_panel_active(&self) -> bool {
        self.active_form_field == FIELD_COUNT
    }

    /// Type a character into the focused input.
    /// Only characters that can appear in the field's kind of number are accepted.
    pub fn form_input_char(&mut self, c: char) {
        let Some(id) = self.active_field_id() else {
            return;
        };
        let accepted = match c {
            '0'..='9' | '-' => true,
            '.' => definition_for(id).kind == FieldKind::Decimal,
            _ => false,
        };
        if accepted {
            let mut raw = self.form.value(id).to_string();
            raw.push(c);
            self.form.set_field(id, raw);
        }
    }

    /// Handle backspace in form
    pub fn form_backspace(&mut self) {
        if let Some(id) = self.active_field_id() {
            let mut raw = self.form.value(id).to_string();
            if raw.pop().is_some() {
                self.form.set_field(id, raw);
            }
        }
    }

    /// Clear form state
    pub fn clear_form(&mut self) {
        self.form.reset();
        self.active_form_field = 0;
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    /// The error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Dismiss the current error; returns true if one was dismissed
    pub fn dismiss_error(&mut self) -> bool {
        self.error_queue.pop_front().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_navigation_wraps_through_action_panel() {
        let mut state = AppState::default();
        state.prev_form_field();
        assert!(state.is_action_panel_active());
        assert_eq!(state.active_field_id(), None);
        state.next_form_field();
        assert_eq!(state.active_field_id(), Some(FieldId::Age));
        for _ in 0..FIELD_COUNT {
            state.next_form_field();
        }
        assert!(state.is_action_panel_active());
    }

    #[test]
    fn test_input_char_edits_active_field() {
        let mut state = AppState::default();
        state.form_input_char('5');
        state.form_input_char('7');
        state.form_input_char('x');
        assert_eq!(state.form.value(FieldId::Age), "57");
        state.form_backspace();
        assert_eq!(state.form.value(FieldId::Age), "5");
    }

    #[test]
    fn test_decimal_point_only_in_decimal_fields() {
        let mut state = AppState::default();
        state.form_input_char('6');
        state.form_input_char('.');
        assert_eq!(state.form.value(FieldId::Age), "6");

        state.active_form_field = FieldId::Oldpeak.index();
        for c in "1.5".chars() {
            state.form_input_char(c);
        }
        assert_eq!(state.form.value(FieldId::Oldpeak), "1.5");
    }

    #[test]
    fn test_input_ignored_on_action_panel() {
        let mut state = AppState {
            active_form_field: FIELD_COUNT,
            ..Default::default()
        };
        state.form_input_char('1');
        state.form_backspace();
        for id in FieldId::ALL {
            assert_eq!(state.form.value(id), "");
        }
    }

    #[test]
    fn test_backspace_on_empty_field_does_not_mark_dirty() {
        let mut state = AppState::default();
        state.form_backspace();
        assert!(!state.form.take_dirty());
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        assert!(state.dismiss_error());
        assert_eq!(state.current_error(), Some("second"));
        assert!(state.dismiss_error());
        assert!(!state.dismiss_error());
    }

    #[test]
    fn test_action_button_cycle() {
        assert_eq!(ActionButton::Submit.next(), ActionButton::Clear);
        assert_eq!(ActionButton::Submit.prev(), ActionButton::Quit);
        assert_eq!(ActionButton::Quit.next(), ActionButton::Submit);
    }
}
