//! Form domain layer
//!
//! Type-safe state for the signup form: field identities, the values and
//! error records keyed by them, and the validator.

mod field;
mod form_state;
pub mod validation;

pub use field::SignupField;
pub use form_state::{Form, FormData, SignupForm};
#[cfg(test)]
pub use form_state::SUBMIT_BUTTON_INDEX;
