//! Range and required-ness validation
//!
//! One validator for every form variant, driven by a `FormProfile` over the
//! static field table. Returns the full mapping of failing fields; an empty
//! mapping signals success.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::fields::{FieldKind, FieldSpec, FormProfile, ProfileField};
use crate::form::state::FormValues;

/// Why a single field failed validation.
///
/// All variants are recoverable by further user input; none propagate beyond
/// the form.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FieldError {
    /// Required numeric field is empty or not parseable as a number.
    #[error("value is missing or not a number")]
    MissingValue,

    /// Numeric value falls outside the field's closed interval.
    #[error("value outside {min}-{max}")]
    OutOfRange { min: f64, max: f64 },

    /// Required non-numeric field is blank after trimming.
    #[error("value is required")]
    Required,
}

impl FieldError {
    /// Inline message shown under the offending input.
    ///
    /// Numeric failures state the accepted interval whether the value was
    /// missing or out of bounds, matching the form's placeholder text.
    pub fn message(&self, spec: &FieldSpec) -> String {
        match self {
            FieldError::MissingValue | FieldError::OutOfRange { .. } => match spec.kind {
                FieldKind::Numeric { min, max, unit } => {
                    if unit.is_empty() {
                        format!("{} must be between {}-{}", spec.label, min, max)
                    } else {
                        format!("{} must be between {}-{} {}", spec.label, min, max, unit)
                    }
                }
                _ => format!("{} is required", spec.label),
            },
            FieldError::Required => format!("{} is required", spec.label),
        }
    }
}

/// Per-field validation failures keyed by field name.
///
/// Only currently-failing fields have an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: FxHashMap<String, (FieldError, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, error: FieldError, message: String) {
        self.entries.insert(field.to_string(), (error, message));
    }

    /// Remove a field's entry, e.g. when the field is edited.
    pub fn clear_field(&mut self, field: &str) {
        self.entries.remove(field);
    }

    pub fn error(&self, field: &str) -> Option<FieldError> {
        self.entries.get(field).map(|(error, _)| *error)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(|(_, message)| message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Names of all failing fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldError, &str)> {
        self.entries
            .iter()
            .map(|(name, (error, message))| (name.as_str(), *error, message.as_str()))
    }
}

/// Validate one field's raw value against its table entry.
///
/// Rules:
/// - required numeric, empty or unparseable -> `MissingValue`
/// - numeric (required or not), parsed but outside [min, max] -> `OutOfRange`
/// - optional numeric, empty -> no error
/// - required text/select/date, blank after trimming -> `Required`
pub fn validate_field(raw: &str, field: &ProfileField) -> Option<(FieldError, String)> {
    let spec = field.spec;
    let trimmed = raw.trim();

    match spec.kind {
        FieldKind::Numeric { min, max, .. } => {
            if trimmed.is_empty() {
                if field.required {
                    return Some((
                        FieldError::MissingValue,
                        FieldError::MissingValue.message(spec),
                    ));
                }
                return None;
            }

            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    if value < min || value > max {
                        let error = FieldError::OutOfRange { min, max };
                        Some((error, error.message(spec)))
                    } else {
                        None
                    }
                }
                _ => Some((
                    FieldError::MissingValue,
                    FieldError::MissingValue.message(spec),
                )),
            }
        }
        FieldKind::Text | FieldKind::Select { .. } | FieldKind::Date => {
            if field.required && trimmed.is_empty() {
                Some((FieldError::Required, FieldError::Required.message(spec)))
            } else {
                None
            }
        }
    }
}

/// Validate raw form values against a profile. Collects every failing field;
/// an empty result signals success.
pub fn validate(values: &FormValues, profile: &FormProfile) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in profile.fields() {
        let raw = values.get(field.spec.name).unwrap_or("");
        if let Some((error, message)) = validate_field(raw, field) {
            errors.insert(field.spec.name, error, message);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FormProfile;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        let mut values = FormValues::new();
        for (name, value) in pairs {
            values.set(name, value);
        }
        values
    }

    #[test]
    fn test_in_range_values_pass() {
        let profile = FormProfile::minimal();
        let values = values(&[
            ("potassium", "150"),
            ("nitrogen", "80"),
            ("phosphorus", "40"),
            ("pH", "6.5"),
        ]);

        let errors = validate(&values, &profile);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_out_of_range_both_sides() {
        let profile = FormProfile::minimal();

        let too_high = values(&[
            ("potassium", "2001"),
            ("nitrogen", "80"),
            ("phosphorus", "40"),
            ("pH", "6.5"),
        ]);
        let errors = validate(&too_high, &profile);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.error("potassium"),
            Some(FieldError::OutOfRange { min: 0.0, max: 2000.0 })
        );
        assert_eq!(
            errors.message("potassium"),
            Some("Potassium must be between 0-2000 ppm")
        );

        let negative = values(&[
            ("potassium", "-1"),
            ("nitrogen", "80"),
            ("phosphorus", "40"),
            ("pH", "6.5"),
        ]);
        let errors = validate(&negative, &profile);
        assert!(matches!(
            errors.error("potassium"),
            Some(FieldError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_boundary_values_accepted() {
        // Closed interval: both endpoints are valid
        let profile = FormProfile::minimal();
        let values = values(&[
            ("potassium", "2000"),
            ("nitrogen", "0"),
            ("phosphorus", "200"),
            ("pH", "14"),
        ]);
        assert!(validate(&values, &profile).is_empty());
    }

    #[test]
    fn test_missing_required_regardless_of_others() {
        let profile = FormProfile::minimal();
        let values = values(&[
            ("nitrogen", "80"),
            ("phosphorus", "40"),
            ("pH", "6.5"),
        ]);

        let errors = validate(&values, &profile);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.error("potassium"), Some(FieldError::MissingValue));
    }

    #[test]
    fn test_non_numeric_is_missing_value() {
        let profile = FormProfile::minimal();
        let values = values(&[
            ("potassium", "plenty"),
            ("nitrogen", "80"),
            ("phosphorus", "40"),
            ("pH", "6.5"),
        ]);

        let errors = validate(&values, &profile);
        assert_eq!(errors.error("potassium"), Some(FieldError::MissingValue));
    }

    #[test]
    fn test_nan_rejected() {
        let profile = FormProfile::minimal();
        let values = values(&[
            ("potassium", "NaN"),
            ("nitrogen", "80"),
            ("phosphorus", "40"),
            ("pH", "6.5"),
        ]);

        let errors = validate(&values, &profile);
        assert_eq!(errors.error("potassium"), Some(FieldError::MissingValue));
    }

    #[test]
    fn test_blank_crop_type_required() {
        let profile = FormProfile::dashboard();
        let values = values(&[
            ("potassium", "150"),
            ("nitrogen", "80"),
            ("cropType", "   "),
        ]);

        let errors = validate(&values, &profile);
        assert_eq!(errors.error("cropType"), Some(FieldError::Required));
        assert_eq!(errors.message("cropType"), Some("Crop type is required"));
    }

    #[test]
    fn test_optional_numeric_skipped_when_empty() {
        let profile = FormProfile::dashboard();
        let values = values(&[
            ("potassium", "150"),
            ("nitrogen", "80"),
            ("cropType", "rice"),
        ]);

        // pH, EC, temperature etc. are absent but optional
        assert!(validate(&values, &profile).is_empty());
    }

    #[test]
    fn test_optional_numeric_range_checked_when_present() {
        let profile = FormProfile::dashboard();
        let values = values(&[
            ("potassium", "150"),
            ("nitrogen", "80"),
            ("cropType", "rice"),
            ("pH", "15"),
        ]);

        let errors = validate(&values, &profile);
        assert!(matches!(
            errors.error("pH"),
            Some(FieldError::OutOfRange { .. })
        ));
        assert_eq!(errors.message("pH"), Some("pH must be between 0-14"));
    }
}
