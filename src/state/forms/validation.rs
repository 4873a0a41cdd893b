//! Client-side validation of the signup form

use super::field::SignupField;
use super::form_state::{FormData, FormErrors};
use regex::Regex;
use std::sync::LazyLock;

pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USERNAME_TOO_SHORT: &str = "Username must be at least 3 characters";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

// Shape check only, unanchored: some substring must look like `x@y.z`.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("EMAIL_SHAPE: invalid regex pattern"));

/// Length as a browser input reports it, in UTF-16 code units
fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Validate every field independently and collect the messages.
///
/// The result is valid iff [`FormErrors::is_valid`] returns true.
pub fn validate(data: &FormData) -> FormErrors {
    let mut errors = FormErrors::default();
    for field in SignupField::ALL {
        if let Some(message) = validate_field(field, data.get(field)) {
            errors.set(field, message);
        }
    }
    errors
}

/// Message for a single field, `None` when the value passes
pub fn validate_field(field: SignupField, value: &str) -> Option<&'static str> {
    match field {
        SignupField::FullName => value.trim().is_empty().then_some(FULL_NAME_REQUIRED),
        SignupField::Email => {
            if value.trim().is_empty() {
                Some(EMAIL_REQUIRED)
            } else if !EMAIL_SHAPE.is_match(value) {
                Some(EMAIL_INVALID)
            } else {
                None
            }
        }
        SignupField::Username => {
            if value.trim().is_empty() {
                Some(USERNAME_REQUIRED)
            } else if input_len(value) < MIN_USERNAME_LEN {
                Some(USERNAME_TOO_SHORT)
            } else {
                None
            }
        }
        SignupField::Password => {
            if value.is_empty() {
                Some(PASSWORD_REQUIRED)
            } else if input_len(value) < MIN_PASSWORD_LEN {
                Some(PASSWORD_TOO_SHORT)
            } else {
                None
            }
        }
    }
}
