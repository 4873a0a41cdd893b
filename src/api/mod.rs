//! Signup API module for HTTP communication

mod client;
mod error;
mod traits;

pub use client::SignupClient;
pub use error::SignupError;
pub use traits::SignupApi;

#[cfg(test)]
pub use error::{GENERIC_FAILURE, SIGNUP_FAILED};
#[cfg(test)]
pub use traits::MockSignupApi;
