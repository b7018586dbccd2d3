//! Form state container
//!
//! Raw string values keyed by field name, mutated on every keystroke, plus
//! the error map from the last validation pass. Values stay untyped strings
//! until the validator coerces them.

use rustc_hash::FxHashMap;

use crate::fields::FormProfile;
use crate::form::validate::{validate, validate_field, ValidationErrors};

/// Raw user-entered values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: FxHashMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|v| v.as_str())
    }

    /// Numeric view of a value, if it parses.
    pub fn parsed(&self, field: &str) -> Option<f64> {
        self.get(field)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What happens to a field's error entry when the field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPolicy {
    /// Clear the error unconditionally without re-validating. This is the
    /// observed form behavior; the field can read as clean while its value
    /// is still invalid until the next submit.
    #[default]
    ClearOnEdit,

    /// Re-run that field's validation against the new value on every edit.
    Revalidate,
}

/// Form values + validation errors for one form variant.
#[derive(Debug, Clone)]
pub struct FormState {
    profile: FormProfile,
    policy: EditPolicy,
    values: FormValues,
    errors: ValidationErrors,
}

impl FormState {
    pub fn new(profile: FormProfile) -> Self {
        FormState {
            profile,
            policy: EditPolicy::default(),
            values: FormValues::new(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn with_policy(profile: FormProfile, policy: EditPolicy) -> Self {
        FormState {
            policy,
            ..FormState::new(profile)
        }
    }

    pub fn profile(&self) -> &FormProfile {
        &self.profile
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Store a raw value under `field` and apply the edit policy to any
    /// existing error entry for it.
    pub fn update_field(&mut self, field: &str, value: &str) {
        self.values.set(field, value);

        match self.policy {
            EditPolicy::ClearOnEdit => {
                self.errors.clear_field(field);
            }
            EditPolicy::Revalidate => {
                self.errors.clear_field(field);
                if let Some(profile_field) = self.profile.field(field) {
                    if let Some((error, message)) = validate_field(value, profile_field) {
                        self.errors.insert(field, error, message);
                    }
                }
            }
        }
    }

    /// Run full validation, storing the collected errors. Returns true when
    /// every field passed.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.values, &self.profile);
        self.errors.is_empty()
    }

    /// Clear all values and all errors unconditionally.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors = ValidationErrors::new();
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field)
    }

    pub fn error_message(&self, field: &str) -> Option<&str> {
        self.errors.message(field)
    }
}
