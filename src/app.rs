//! Application state and core logic

use crate::api::{SignupApi, SignupClient, SignupError};
use crate::config::TuiConfig;
use crate::state::{AppState, Form, SignupField, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Notice shown on the login view after an account was created
pub const ACCOUNT_CREATED_NOTICE: &str = "Account created. Sign in to continue.";

type SubmissionResult = Result<Value, SignupError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Client for the signup endpoint
    api: Arc<dyn SignupApi>,
    /// Login page the successful signup redirects to
    pub login_url: String,
    /// Whether the app should quit
    quit: bool,
    /// Completed requests are reported back to the event loop through this channel
    submission_tx: mpsc::UnboundedSender<SubmissionResult>,
    submission_rx: mpsc::UnboundedReceiver<SubmissionResult>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let api = SignupClient::new(config)?;
        Ok(Self::with_api(Arc::new(api), config.login_url()))
    }

    /// Create an App backed by any signup endpoint implementation
    pub fn with_api(api: Arc<dyn SignupApi>, login_url: String) -> Self {
        let (submission_tx, submission_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            login_url,
            quit: false,
            submission_tx,
            submission_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the alert queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle alert dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        match self.state.current_view {
            View::Signup => self.handle_signup_key(key),
            View::Login => self.handle_login_key(key),
        }
    }

    /// Handle bracketed paste
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.has_errors() {
            return;
        }
        if matches!(self.state.current_view, View::Signup) {
            self.state.form.paste(text);
        }
    }

    /// Navigate to a new view. Leaving the form discards its input.
    pub fn navigate(&mut self, view: View) {
        if self.state.current_view == view {
            return;
        }
        if self.state.current_view.is_form_view() {
            self.state.clear_form();
        }
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        let previous = self.state.view_history.pop().unwrap_or_default();
        if self.state.current_view.is_form_view() {
            self.state.clear_form();
        }
        self.state.current_view = previous;
    }

    /// Handle keys in Signup view
    fn handle_signup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit = true,
            // Submit (Ctrl+S, or Cmd+Enter / Ctrl+Enter)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Enter if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit()
            }
            // "Already have an account? Sign in"
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.login_notice = None;
                self.navigate(View::Login);
            }
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Enter => match self.state.form.active() {
                Some(SignupField::Password) | None => self.submit(),
                Some(_) => self.state.form.next_field(),
            },
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.state.form.input_char(c)
            }
            KeyCode::Backspace => self.state.form.backspace(),
            _ => {}
        }
    }

    /// Handle keys in Login view
    fn handle_login_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.state.login_notice = None;
            self.go_back();
        }
    }

    /// Validate the form and, when valid, send it to the signup endpoint.
    ///
    /// The request runs on a background task; its result is applied by
    /// [`App::poll_submissions`]. Fields stay editable meanwhile, but a second
    /// submit is ignored until the pending request completes.
    pub fn submit(&mut self) {
        if !self.state.form.validate() {
            let invalid: Vec<&str> = SignupField::ALL
                .iter()
                .filter(|f| !self.state.form.errors.get(**f).is_empty())
                .map(|f| f.wire_name())
                .collect();
            tracing::debug!(?invalid, "Signup form has validation errors");
            return;
        }

        if self.state.submitting {
            tracing::warn!("Signup request already pending, ignoring submit");
            return;
        }
        self.state.submitting = true;

        let api = Arc::clone(&self.api);
        let tx = self.submission_tx.clone();
        let request = self.state.form.data.clone();
        tokio::spawn(async move {
            let result = api.signup(request).await;
            if tx.send(result).is_err() {
                tracing::debug!("Signup result dropped, application is shutting down");
            }
        });
    }

    /// Apply any completed signup requests
    pub fn poll_submissions(&mut self) {
        while let Ok(result) = self.submission_rx.try_recv() {
            self.finish_submission(result);
        }
    }

    /// Wait for the pending signup request and apply its result
    #[cfg(test)]
    async fn wait_for_submission(&mut self) {
        if let Some(result) = self.submission_rx.recv().await {
            self.finish_submission(result);
        }
    }

    /// Turn a signup outcome into a redirect or an alert
    fn finish_submission(&mut self, result: SubmissionResult) {
        self.state.submitting = false;

        match result {
            Ok(body) => {
                tracing::info!(response = %body, "Signup successful");
                self.redirect_to_login();
            }
            Err(err) => {
                if err.is_rejection() {
                    tracing::warn!(error = %err, "Signup rejected by server");
                } else {
                    tracing::error!(error = %err, "Error during signup");
                }
                self.push_error(err.alert_message());
            }
        }
    }

    fn redirect_to_login(&mut self) {
        self.state.login_notice = Some(ACCOUNT_CREATED_NOTICE.to_string());
        self.navigate(View::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockSignupApi, GENERIC_FAILURE, SIGNUP_FAILED};
    use crate::state::validation::{EMAIL_INVALID, PASSWORD_REQUIRED};
    use crate::state::{FormData, SUBMIT_BUTTON_INDEX};
    use serde_json::json;

    const LOGIN_URL: &str = "http://localhost:3000/login";

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(mock: MockSignupApi) -> App {
        App::with_api(Arc::new(mock), LOGIN_URL.to_string())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn valid_data() -> FormData {
        FormData {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            password: "analytical".to_string(),
        }
    }

    /// Fill every field through key events, leaving focus on the password
    fn fill_form(app: &mut App, data: &FormData) {
        type_text(app, &data.full_name);
        app.handle_key(key(KeyCode::Tab));
        type_text(app, &data.email);
        app.handle_key(key(KeyCode::Tab));
        type_text(app, &data.username);
        app.handle_key(key(KeyCode::Tab));
        type_text(app, &data.password);
    }

    fn expect_one_signup(mock: &mut MockSignupApi, result: SubmissionResult) {
        let expected = valid_data();
        mock.expect_signup()
            .withf(move |request| *request == expected)
            .times(1)
            .returning(move |_| result.clone());
    }

    mod input {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_fills_fields_in_order() {
            let mut app = app_with(MockSignupApi::new());
            fill_form(&mut app, &valid_data());
            assert_eq!(app.state.form.data, valid_data());
        }

        #[test]
        fn test_enter_on_field_moves_to_next() {
            let mut app = app_with(MockSignupApi::new());
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.state.form.active(), Some(SignupField::Email));
            assert!(app.state.form.errors.is_valid());
        }

        #[test]
        fn test_up_and_down_move_focus() {
            let mut app = app_with(MockSignupApi::new());
            app.handle_key(key(KeyCode::Up));
            assert_eq!(app.state.form.active_field_index, SUBMIT_BUTTON_INDEX);
            app.handle_key(key(KeyCode::Down));
            assert_eq!(app.state.form.active(), Some(SignupField::FullName));
        }

        #[test]
        fn test_control_chords_are_not_typed() {
            let mut app = app_with(MockSignupApi::new());
            app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
            assert_eq!(app.state.form.data.full_name, "");
        }

        #[test]
        fn test_shifted_chars_are_typed() {
            let mut app = app_with(MockSignupApi::new());
            app.handle_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
            assert_eq!(app.state.form.data.full_name, "A");
        }

        #[test]
        fn test_paste_goes_to_active_field() {
            let mut app = app_with(MockSignupApi::new());
            app.handle_paste("Ada\nLovelace");
            assert_eq!(app.state.form.data.full_name, "AdaLovelace");
        }

        #[test]
        fn test_editing_clears_only_edited_error() {
            let mut app = app_with(MockSignupApi::new());
            app.submit();
            assert!(!app.state.form.errors.is_valid());

            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "x");

            assert_eq!(app.state.form.errors.email, "");
            assert!(!app.state.form.errors.full_name.is_empty());
            assert!(!app.state.form.errors.username.is_empty());
            assert!(!app.state.form.errors.password.is_empty());
        }

        #[test]
        fn test_esc_on_signup_quits() {
            let mut app = app_with(MockSignupApi::new());
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[test]
        fn test_ctrl_c_quits_from_login() {
            let mut app = app_with(MockSignupApi::new());
            app.navigate(View::Login);
            app.handle_key(ctrl('c'));
            assert!(app.should_quit());
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_sign_in_link_opens_login_and_discards_form() {
            let mut app = app_with(MockSignupApi::new());
            type_text(&mut app, "Ada");
            app.handle_key(ctrl('l'));

            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(app.state.view_history, vec![View::Signup]);
            assert_eq!(app.state.form.data, FormData::default());
            assert!(app.state.login_notice.is_none());
        }

        #[test]
        fn test_esc_on_login_returns_to_signup() {
            let mut app = app_with(MockSignupApi::new());
            app.handle_key(ctrl('l'));
            app.handle_key(key(KeyCode::Esc));

            assert_eq!(app.state.current_view, View::Signup);
            assert!(app.state.view_history.is_empty());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_navigate_to_current_view_is_noop() {
            let mut app = app_with(MockSignupApi::new());
            type_text(&mut app, "Ada");
            app.navigate(View::Signup);
            assert!(app.state.view_history.is_empty());
            assert_eq!(app.state.form.data.full_name, "Ada");
        }

        #[test]
        fn test_typing_on_login_does_not_touch_form() {
            let mut app = app_with(MockSignupApi::new());
            app.navigate(View::Login);
            type_text(&mut app, "abc");
            app.handle_paste("pasted");
            assert_eq!(app.state.form.data, FormData::default());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_form_sends_nothing() {
            // No expectation: any call to the mock panics
            let mut app = app_with(MockSignupApi::new());
            type_text(&mut app, "Ada");
            app.handle_key(ctrl('s'));

            assert!(!app.state.submitting);
            assert_eq!(app.state.form.errors.password, PASSWORD_REQUIRED);
            assert_eq!(app.state.current_view, View::Signup);
            assert!(!app.state.has_errors());
        }

        #[test]
        fn test_enter_on_password_submits() {
            let mut app = app_with(MockSignupApi::new());
            app.state.form.set_active_field(SignupField::Password.index());
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.state.form.errors.password, PASSWORD_REQUIRED);
        }

        #[test]
        fn test_invalid_email_is_reported_inline() {
            let mut app = app_with(MockSignupApi::new());
            let data = FormData {
                email: "not-an-email".to_string(),
                ..valid_data()
            };
            fill_form(&mut app, &data);
            app.submit();
            assert_eq!(app.state.form.errors.email, EMAIL_INVALID);
            assert!(!app.state.submitting);
        }

        #[tokio::test]
        async fn test_success_posts_once_and_redirects_once() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(&mut mock, Ok(json!({"id": 7})));
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());

            app.handle_key(ctrl('s'));
            assert!(app.state.submitting);
            app.wait_for_submission().await;

            assert!(!app.state.submitting);
            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(app.state.view_history, vec![View::Signup]);
            assert_eq!(
                app.state.login_notice.as_deref(),
                Some(ACCOUNT_CREATED_NOTICE)
            );
            assert!(!app.state.has_errors());
            assert_eq!(app.state.form.data, FormData::default());
        }

        #[tokio::test]
        async fn test_submit_button_submits() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(&mut mock, Ok(json!({})));
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());

            app.handle_key(key(KeyCode::Tab));
            assert!(app.state.form.is_submit_active());
            app.handle_key(key(KeyCode::Enter));
            app.wait_for_submission().await;

            assert_eq!(app.state.current_view, View::Login);
        }

        #[tokio::test]
        async fn test_rejection_shows_one_alert_with_server_message() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(
                &mut mock,
                Err(SignupError::Rejected {
                    status: 409,
                    message: Some("Username already taken".to_string()),
                }),
            );
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());

            app.submit();
            app.wait_for_submission().await;

            assert_eq!(app.state.error_count(), 1);
            assert_eq!(app.state.current_error(), Some("Username already taken"));
            assert_eq!(app.state.current_view, View::Signup);
            assert_eq!(app.state.form.data, valid_data());
            assert!(!app.state.submitting);
        }

        #[tokio::test]
        async fn test_rejection_without_message_uses_fallback() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(
                &mut mock,
                Err(SignupError::Rejected {
                    status: 500,
                    message: None,
                }),
            );
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());

            app.submit();
            app.wait_for_submission().await;

            assert_eq!(app.state.current_error(), Some(SIGNUP_FAILED));
        }

        #[tokio::test]
        async fn test_transport_failure_shows_generic_alert() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(
                &mut mock,
                Err(SignupError::Transport("connection refused".to_string())),
            );
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());

            app.submit();
            app.wait_for_submission().await;

            assert_eq!(app.state.error_count(), 1);
            assert_eq!(app.state.current_error(), Some(GENERIC_FAILURE));
            assert_eq!(app.state.current_view, View::Signup);
        }

        #[tokio::test]
        async fn test_alert_blocks_input_until_dismissed() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(
                &mut mock,
                Err(SignupError::Decode("expected value".to_string())),
            );
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());
            app.submit();
            app.wait_for_submission().await;

            type_text(&mut app, "zz");
            app.handle_paste("zz");
            assert_eq!(app.state.form.data, valid_data());

            app.handle_key(key(KeyCode::Enter));
            assert!(!app.state.has_errors());

            type_text(&mut app, "z");
            assert_eq!(app.state.form.data.password, "analyticalz");
        }

        #[tokio::test]
        async fn test_second_submit_while_pending_is_ignored() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(&mut mock, Ok(json!({"id": 1})));
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());

            app.submit();
            app.submit();
            app.handle_key(ctrl('s'));
            app.wait_for_submission().await;

            assert_eq!(app.state.current_view, View::Login);
            assert_eq!(app.state.view_history.len(), 1);
            app.poll_submissions();
            assert_eq!(app.state.view_history.len(), 1);
        }

        #[tokio::test]
        async fn test_fields_stay_editable_while_pending() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(
                &mut mock,
                Err(SignupError::Rejected {
                    status: 400,
                    message: Some("nope".to_string()),
                }),
            );
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());

            app.submit();
            type_text(&mut app, "!");
            assert_eq!(app.state.form.data.password, "analytical!");

            app.wait_for_submission().await;
            assert_eq!(app.state.form.data.password, "analytical!");
        }

        #[tokio::test]
        async fn test_poll_submissions_applies_completed_result() {
            let mut mock = MockSignupApi::new();
            expect_one_signup(&mut mock, Ok(json!({})));
            let mut app = app_with(mock);
            fill_form(&mut app, &valid_data());

            app.submit();
            // Let the spawned request finish
            while app.state.submitting {
                tokio::task::yield_now().await;
                app.poll_submissions();
            }

            assert_eq!(app.state.current_view, View::Login);
        }

        #[test]
        fn test_poll_submissions_without_pending_request_is_noop() {
            let mut app = app_with(MockSignupApi::new());
            app.poll_submissions();
            assert_eq!(app.state.current_view, View::Signup);
        }
    }
}
