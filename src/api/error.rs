//! Errors reported by the signup endpoint

use thiserror::Error;

/// Alert shown when the server rejects the signup without a message
pub const SIGNUP_FAILED: &str = "Signup failed";

/// Alert shown when the request could not be completed
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    /// Non-success status with a JSON body
    #[error("signup rejected with status {status}: {}", .message.as_deref().unwrap_or(SIGNUP_FAILED))]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not JSON
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl SignupError {
    /// Text shown to the user in the alert dialog
    pub fn alert_message(&self) -> &str {
        match self {
            SignupError::Rejected { message, .. } => message.as_deref().unwrap_or(SIGNUP_FAILED),
            SignupError::Transport(_) | SignupError::Decode(_) => GENERIC_FAILURE,
        }
    }

    /// Whether the server answered, as opposed to a transport or decoding failure
    pub fn is_rejection(&self) -> bool {
        matches!(self, SignupError::Rejected { .. })
    }
}
