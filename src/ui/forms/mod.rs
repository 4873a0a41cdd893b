//! Form rendering module
//!
//! - `field_renderer`: labelled input with its inline error
//! - `signup_form`: the account creation form

mod field_renderer;
mod signup_form;

pub use signup_form::draw_signup;
