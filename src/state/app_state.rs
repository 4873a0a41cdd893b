//! Application state definitions

use super::forms::SignupForm;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Signup,
    Login,
}

impl View {
    /// Views whose input is discarded when they are left
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::Signup)
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Form state
    pub form: SignupForm,

    // Submission
    pub submitting: bool,
    /// Confirmation shown on the login view after an account was created
    pub login_notice: Option<String>,

    /// Alerts waiting to be dismissed, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    /// Queue an alert for display
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    /// Whether an alert is blocking input
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The alert currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Dismiss the alert currently shown
    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Number of alerts raised and not yet dismissed
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Clear form state
    pub fn clear_form(&mut self) {
        self.form.clear();
    }
}
