//! Form state management and the signup form

use super::field::SignupField;
use super::validation;
use serde::Serialize;
use std::fmt;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Current values of the signup inputs, sent verbatim as the request body
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl FormData {
    pub fn get(&self, field: SignupField) -> &str {
        match field {
            SignupField::FullName => &self.full_name,
            SignupField::Email => &self.email,
            SignupField::Username => &self.username,
            SignupField::Password => &self.password,
        }
    }

    pub fn get_mut(&mut self, field: SignupField) -> &mut String {
        match field {
            SignupField::FullName => &mut self.full_name,
            SignupField::Email => &mut self.email,
            SignupField::Username => &mut self.username,
            SignupField::Password => &mut self.password,
        }
    }
}

impl fmt::Debug for FormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormData")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Per-field validation messages; an empty string means no error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl FormErrors {
    pub fn get(&self, field: SignupField) -> &str {
        match field {
            SignupField::FullName => &self.full_name,
            SignupField::Email => &self.email,
            SignupField::Username => &self.username,
            SignupField::Password => &self.password,
        }
    }

    fn slot_mut(&mut self, field: SignupField) -> &mut String {
        match field {
            SignupField::FullName => &mut self.full_name,
            SignupField::Email => &mut self.email,
            SignupField::Username => &mut self.username,
            SignupField::Password => &mut self.password,
        }
    }

    pub fn set(&mut self, field: SignupField, message: impl Into<String>) {
        *self.slot_mut(field) = message.into();
    }

    pub fn clear(&mut self, field: SignupField) {
        self.slot_mut(field).clear();
    }

    /// True iff every message is empty
    pub fn is_valid(&self) -> bool {
        SignupField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// Focus index of the submit button, one past the last field
pub const SUBMIT_BUTTON_INDEX: usize = SignupField::ALL.len();

/// Account creation form
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub data: FormData,
    pub errors: FormErrors,
    pub active_field_index: usize,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field under focus, `None` when the submit button is focused
    pub fn active(&self) -> Option<SignupField> {
        SignupField::from_index(self.active_field_index)
    }

    /// Returns true if the submit button is currently focused
    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == SUBMIT_BUTTON_INDEX
    }

    /// Replace a field's value. Its error is cleared whenever the value changes.
    pub fn set_value(&mut self, field: SignupField, value: String) {
        let slot = self.data.get_mut(field);
        if *slot != value {
            *slot = value;
            self.errors.clear(field);
        }
    }

    /// Push a character to the focused field
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.active() {
            self.data.get_mut(field).push(c);
            self.errors.clear(field);
        }
    }

    /// Append pasted text to the focused field, dropping line breaks
    pub fn paste(&mut self, text: &str) {
        let Some(field) = self.active() else {
            return;
        };
        let cleaned: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        if cleaned.is_empty() {
            return;
        }
        let value = format!("{}{cleaned}", self.data.get(field));
        self.set_value(field, value);
    }

    /// Remove the last character from the focused field
    pub fn backspace(&mut self) {
        if let Some(field) = self.active() {
            if self.data.get_mut(field).pop().is_some() {
                self.errors.clear(field);
            }
        }
    }

    /// Run the validator, store its messages and report validity
    pub fn validate(&mut self) -> bool {
        self.errors = validation::validate(&self.data);
        self.errors.is_valid()
    }

    /// Reset values, errors and focus
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Form for SignupForm {
    fn field_count(&self) -> usize {
        SUBMIT_BUTTON_INDEX + 1 // four fields, submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_BUTTON_INDEX);
    }
}
