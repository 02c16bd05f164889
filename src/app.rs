//! Application state and core logic

use crate::service::PredictionService;
use crate::state::forms::{SubmitStatus, SAMPLE_VALUES};
use crate::state::{ActionButton, AppState, ErrorKind};
use crate::submission::{SubmissionController, SubmitOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Submission lifecycle for the form
    pub submissions: SubmissionController,
    /// Prediction endpoint, for the status bar
    pub endpoint: String,
    /// Whether the app should quit
    quit: bool,
    /// Whether the screen needs to be redrawn
    redraw: bool,
}

impl App {
    /// Create a new App talking to `service`
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        let submissions = SubmissionController::new(service);
        let endpoint = submissions.endpoint();

        Self {
            state: AppState::default(),
            submissions,
            endpoint,
            quit: false,
            redraw: true,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Force a redraw on the next frame (e.g. after a resize)
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Returns true if anything changed since the last frame
    pub fn take_redraw(&mut self) -> bool {
        let form_dirty = self.state.form.take_dirty();
        std::mem::take(&mut self.redraw) || form_dirty
    }

    /// Apply finished requests to the form
    pub fn poll_submissions(&mut self) {
        if self.submissions.poll(&mut self.state.form) {
            self.on_submission_finished();
        }
    }

    /// Validate and send the form
    pub fn submit(&mut self) {
        match self.submissions.submit(&mut self.state.form) {
            SubmitOutcome::Rejected => {
                self.state.status_message = Some("A prediction is already in progress".to_string());
            }
            SubmitOutcome::Invalid => {
                // Jump to the first field that needs fixing
                let first = self
                    .state
                    .form
                    .error()
                    .and_then(|e| e.field_violations.keys().next().copied());
                if let Some(id) = first {
                    self.state.active_form_field = id.index();
                }
                self.state.status_message = Some("Fix the highlighted fields".to_string());
            }
            SubmitOutcome::Started(_) => {
                self.state.status_message = Some("Requesting prediction...".to_string());
            }
        }
        self.redraw = true;
    }

    fn on_submission_finished(&mut self) {
        match self.state.form.status() {
            SubmitStatus::Succeeded => {
                self.state.status_message = Some("Prediction received".to_string());
            }
            SubmitStatus::Failed => {
                if let Some(error) = self.state.form.error() {
                    if error.kind != ErrorKind::ValidationError {
                        let message = error.to_string();
                        self.state.push_error(message);
                    }
                }
                self.state.status_message = None;
            }
            SubmitStatus::Idle | SubmitStatus::Submitting => {}
        }
        self.redraw = true;
    }

    /// Fill every field with a known-good example
    pub fn load_sample(&mut self) {
        for (id, raw) in SAMPLE_VALUES {
            self.state.form.set_field(id, raw);
        }
        self.state.status_message = Some("Loaded sample values".to_string());
    }

    /// Fill fields by name, skipping names that are not form fields
    pub fn apply_prefill(&mut self, values: &BTreeMap<String, String>) {
        let mut unknown = Vec::new();
        for (name, raw) in values {
            if let Err(err) = self.state.form.set_field_by_name(name, raw.as_str()) {
                tracing::warn!(error = %err, "skipping prefill value");
                unknown.push(name.as_str());
            }
        }
        if !unknown.is_empty() {
            self.state.status_message = Some(format!("Unknown fields in config: {}", unknown.join(", ")));
        }
    }

    fn press_button(&mut self, button: ActionButton) {
        match button {
            ActionButton::Submit => self.submit(),
            ActionButton::Clear => {
                self.state.clear_form();
                self.state.status_message = None;
            }
            ActionButton::Quit => self.quit = true,
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.redraw = true;

        // An open error dialog swallows input until dismissed
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let on_action_panel = self.state.is_action_panel_active();

        match key.code {
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('l') if ctrl => self.load_sample(),
            KeyCode::Char('r') if ctrl => self.press_button(ActionButton::Clear),
            KeyCode::Char('q') if ctrl => self.quit = true,
            KeyCode::Tab => self.state.next_form_field(),
            KeyCode::BackTab => self.state.prev_form_field(),
            // Up/Down for action panel navigation
            KeyCode::Up | KeyCode::Char('k') if on_action_panel => {
                self.state.selected_button = self.state.selected_button.prev();
            }
            KeyCode::Down | KeyCode::Char('j') if on_action_panel => {
                self.state.selected_button = self.state.selected_button.next();
            }
            KeyCode::Enter if on_action_panel => {
                let button = self.state.selected_button;
                self.press_button(button);
            }
            KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Down => self.state.next_form_field(),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.state.status_message = None,
            KeyCode::Char(c) if !ctrl && !on_action_panel => self.state.form_input_char(c),
            KeyCode::Backspace => self.state.form_backspace(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockPredictionService;
    use crate::state::forms::{FieldId, FIELD_COUNT};
    use crate::state::{Classification, ErrorInfo};
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(mock: MockPredictionService) -> App {
        let mut mock = mock;
        mock.expect_endpoint()
            .return_const("http://localhost:8000/api/predict-rating/".to_string());
        App::new(Arc::new(mock))
    }

    fn idle_app() -> App {
        let mut mock = MockPredictionService::new();
        mock.expect_predict().times(0);
        app_with(mock)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    async fn finish(app: &mut App) {
        assert!(app.submissions.wait(&mut app.state.form).await);
        app.on_submission_finished();
    }

    mod app_basic_tests {
        use super::*;

        #[test]
        fn test_should_quit_initially_false() {
            let app = idle_app();
            assert!(!app.should_quit());
            assert_eq!(app.endpoint, "http://localhost:8000/api/predict-rating/");
        }

        #[test]
        fn test_first_frame_needs_redraw() {
            let mut app = idle_app();
            assert!(app.take_redraw());
            assert!(!app.take_redraw());
            app.request_redraw();
            assert!(app.take_redraw());
        }

        #[test]
        fn test_ctrl_q_quits() {
            let mut app = idle_app();
            app.handle_key(ctrl('q'));
            assert!(app.should_quit());
        }

        #[test]
        fn test_quit_button() {
            let mut app = idle_app();
            app.state.active_form_field = FIELD_COUNT;
            app.handle_key(key(KeyCode::Up));
            assert_eq!(app.state.selected_button, ActionButton::Quit);
            app.handle_key(key(KeyCode::Enter));
            assert!(app.should_quit());
        }

        #[test]
        fn test_key_event_kind_defaults_to_press() {
            assert_eq!(key(KeyCode::Enter).kind, KeyEventKind::Press);
        }
    }

    mod editing_tests {
        use super::*;

        #[test]
        fn test_typing_fills_fields_in_tab_order() {
            let mut app = idle_app();
            type_str(&mut app, "57");
            app.handle_key(key(KeyCode::Tab));
            type_str(&mut app, "1");
            app.handle_key(key(KeyCode::Down));
            type_str(&mut app, "2x");

            assert_eq!(app.state.form.value(FieldId::Age), "57");
            assert_eq!(app.state.form.value(FieldId::Sex), "1");
            assert_eq!(app.state.form.value(FieldId::Cp), "2");
            assert_eq!(app.state.active_field_id(), Some(FieldId::Cp));
        }

        #[test]
        fn test_backspace_edits_active_field() {
            let mut app = idle_app();
            type_str(&mut app, "570");
            app.handle_key(key(KeyCode::Backspace));
            assert_eq!(app.state.form.value(FieldId::Age), "57");
        }

        #[test]
        fn test_load_sample_and_clear() {
            let mut app = idle_app();
            app.handle_key(ctrl('l'));
            assert_eq!(app.state.form.value(FieldId::Thal), "2");
            app.handle_key(ctrl('r'));
            assert_eq!(app.state.form.value(FieldId::Thal), "");
            assert_eq!(app.state.active_field_id(), Some(FieldId::Age));
        }

        #[test]
        fn test_prefill_sets_known_fields_and_reports_unknown() {
            let mut app = idle_app();
            let values = BTreeMap::from([
                ("age".to_string(), "63".to_string()),
                ("oldpeak".to_string(), "2.3".to_string()),
                ("Edad".to_string(), "40".to_string()),
            ]);

            app.apply_prefill(&values);

            assert_eq!(app.state.form.value(FieldId::Age), "63");
            assert_eq!(app.state.form.value(FieldId::Oldpeak), "2.3");
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Unknown fields in config: Edad")
            );
        }

        #[test]
        fn test_edit_after_result_clears_it() {
            let mut app = idle_app();
            app.state.form.begin_submit();
            app.state
                .form
                .complete_submit(Ok(Classification::Positive))
                .unwrap();
            type_str(&mut app, "6");
            assert_eq!(app.state.form.status(), SubmitStatus::Idle);
            assert!(app.state.form.result().is_none());
        }
    }

    mod submit_tests {
        use super::*;

        #[test]
        fn test_invalid_submit_focuses_first_violation() {
            let mut app = idle_app();
            app.handle_key(ctrl('l'));
            app.state.form.set_field(FieldId::Slope, "7");
            app.state.form.set_field(FieldId::Sex, "2");
            app.state.active_form_field = 0;

            app.handle_key(key(KeyCode::Enter));

            assert_eq!(app.state.form.status(), SubmitStatus::Failed);
            assert_eq!(app.state.active_field_id(), Some(FieldId::Sex));
            // Validation errors stay inline, no dialog
            assert!(app.state.current_error().is_none());
        }

        #[tokio::test]
        async fn test_successful_submit() {
            let mut mock = MockPredictionService::new();
            mock.expect_predict()
                .times(1)
                .returning(|_| Ok(Classification::Negative));
            let mut app = app_with(mock);
            app.handle_key(ctrl('l'));

            app.handle_key(ctrl('s'));
            assert!(app.state.form.is_submitting());
            finish(&mut app).await;

            assert_eq!(app.state.form.result(), Some(Classification::Negative));
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Prediction received")
            );
        }

        #[tokio::test]
        async fn test_repeated_enter_sends_one_request() {
            let mut mock = MockPredictionService::new();
            mock.expect_predict()
                .times(1)
                .returning(|_| Ok(Classification::Positive));
            let mut app = app_with(mock);
            app.handle_key(ctrl('l'));

            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Enter));

            assert_eq!(
                app.state.status_message.as_deref(),
                Some("A prediction is already in progress")
            );
            finish(&mut app).await;
            assert_eq!(app.state.form.result(), Some(Classification::Positive));
        }

        #[tokio::test]
        async fn test_remote_error_opens_dialog_until_dismissed() {
            let mut mock = MockPredictionService::new();
            mock.expect_predict()
                .times(1)
                .returning(|_| Err(ErrorInfo::service("model unavailable")));
            let mut app = app_with(mock);
            app.handle_key(ctrl('l'));
            app.submit();
            finish(&mut app).await;

            assert_eq!(
                app.state.current_error(),
                Some("Service error: model unavailable")
            );

            // Other keys are swallowed while the dialog is open
            type_str(&mut app, "9");
            assert_eq!(app.state.form.value(FieldId::Age), "57");

            app.handle_key(key(KeyCode::Esc));
            assert!(app.state.current_error().is_none());
            assert_eq!(app.state.form.status(), SubmitStatus::Failed);
        }

        #[tokio::test]
        async fn test_poll_submissions_applies_result() {
            let mut mock = MockPredictionService::new();
            mock.expect_predict()
                .times(1)
                .returning(|_| Ok(Classification::Positive));
            let mut app = app_with(mock);
            app.load_sample();
            app.submit();

            for _ in 0..100 {
                app.poll_submissions();
                if !app.state.form.is_submitting() {
                    break;
                }
                tokio::task::yield_now().await;
            }

            assert_eq!(app.state.form.status(), SubmitStatus::Succeeded);
        }
    }
}
