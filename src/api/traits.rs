//! Trait abstraction for the signup endpoint to enable mocking in tests

use super::error::SignupError;
use crate::state::FormData;
use async_trait::async_trait;

/// Trait for signup endpoint operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupApi: Send + Sync {
    /// Create an account from the submitted form values.
    ///
    /// Returns the JSON body of a successful response. Any other outcome is a
    /// [`SignupError`].
    async fn signup(&self, request: FormData) -> Result<serde_json::Value, SignupError>;
}
