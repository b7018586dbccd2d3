//! Form State & Validation
//!
//! Holds raw user-entered values, validates them against the field table,
//! and tracks per-field error messages for the view layer.

pub mod state;
pub mod validate;

pub use state::{EditPolicy, FormState, FormValues};
pub use validate::{validate, validate_field, FieldError, ValidationErrors};
