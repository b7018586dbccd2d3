//! Field Specification Table
//!
//! Single source of truth for every user-editable input: name, label, kind
//! and numeric bounds. The two form variants (the four-field soil form and
//! the full dashboard) are expressed as profiles over this one table instead
//! of carrying their own validation code.

/// What kind of value a field accepts, and the constraint that goes with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Numeric reading constrained to a closed interval [min, max].
    Numeric {
        min: f64,
        max: f64,
        /// Display unit ("ppm", "°C", ...); empty for unitless values (pH).
        unit: &'static str,
    },

    /// Free text (trimmed before required-ness checks).
    Text,

    /// One of a fixed set of options.
    Select { options: &'static [&'static str] },

    /// Calendar date entered as text (YYYY-MM-DD).
    Date,
}

impl FieldKind {
    /// Numeric bounds, if this is a numeric field.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            FieldKind::Numeric { min, max, .. } => Some((*min, *max)),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Numeric { .. })
    }
}

/// One row of the field table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key used in form values and error maps (matches the view's input names).
    pub name: &'static str,

    /// Human-readable label used in error messages.
    pub label: &'static str,

    pub kind: FieldKind,
}

impl FieldSpec {
    /// Look up a field by its name key.
    pub fn by_name(name: &str) -> Option<&'static FieldSpec> {
        FIELD_SPECS.iter().find(|spec| spec.name == name)
    }
}

/// Crop options offered by the dashboard form.
pub const CROP_TYPES: &[&str] = &["rice", "wheat", "maize", "soybean"];

/// Growth stage options.
pub const GROWTH_STAGES: &[&str] = &["seedling", "vegetative", "flowering", "maturity"];

/// Irrigation frequency options.
pub const IRRIGATION_FREQUENCIES: &[&str] = &["daily", "alternate", "weekly", "biweekly"];

/// Season options.
pub const SEASONS: &[&str] = &["kharif", "rabi", "zaid"];

/// Every field the extended dashboard collects.
///
/// Soil ranges follow the agronomic bounds used on the input form
/// (potassium 0-2000 ppm, nitrogen 0-500 ppm, phosphorus 0-200 ppm,
/// pH 0-14); climate ranges follow the form's placeholder bands.
pub const FIELD_SPECS: &[FieldSpec] = &[
    // Soil parameters
    FieldSpec {
        name: "potassium",
        label: "Potassium",
        kind: FieldKind::Numeric { min: 0.0, max: 2000.0, unit: "ppm" },
    },
    FieldSpec {
        name: "nitrogen",
        label: "Nitrogen",
        kind: FieldKind::Numeric { min: 0.0, max: 500.0, unit: "ppm" },
    },
    FieldSpec {
        name: "phosphorus",
        label: "Phosphorus",
        kind: FieldKind::Numeric { min: 0.0, max: 200.0, unit: "ppm" },
    },
    FieldSpec {
        name: "pH",
        label: "pH",
        kind: FieldKind::Numeric { min: 0.0, max: 14.0, unit: "" },
    },
    FieldSpec {
        name: "EC",
        label: "Electrical conductivity",
        kind: FieldKind::Numeric { min: 0.0, max: 10.0, unit: "dS/m" },
    },
    FieldSpec {
        name: "OC",
        label: "Organic carbon",
        kind: FieldKind::Numeric { min: 0.0, max: 10.0, unit: "%" },
    },
    // Climate parameters
    FieldSpec {
        name: "temperature",
        label: "Temperature",
        kind: FieldKind::Numeric { min: 15.0, max: 45.0, unit: "°C" },
    },
    FieldSpec {
        name: "humidity",
        label: "Humidity",
        kind: FieldKind::Numeric { min: 30.0, max: 90.0, unit: "%" },
    },
    FieldSpec {
        name: "rainfall",
        label: "Rainfall",
        kind: FieldKind::Numeric { min: 0.0, max: 2000.0, unit: "mm" },
    },
    FieldSpec {
        name: "solarRadiation",
        label: "Solar radiation",
        kind: FieldKind::Numeric { min: 0.0, max: 35.0, unit: "MJ/m²/day" },
    },
    FieldSpec {
        name: "windSpeed",
        label: "Wind speed",
        kind: FieldKind::Numeric { min: 0.0, max: 120.0, unit: "km/h" },
    },
    // Crop parameters
    FieldSpec {
        name: "cropType",
        label: "Crop type",
        kind: FieldKind::Select { options: CROP_TYPES },
    },
    FieldSpec {
        name: "plantingDate",
        label: "Planting date",
        kind: FieldKind::Date,
    },
    FieldSpec {
        name: "growthStage",
        label: "Growth stage",
        kind: FieldKind::Select { options: GROWTH_STAGES },
    },
    FieldSpec {
        name: "irrigationFreq",
        label: "Irrigation frequency",
        kind: FieldKind::Select { options: IRRIGATION_FREQUENCIES },
    },
    FieldSpec {
        name: "region",
        label: "Region",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "season",
        label: "Season",
        kind: FieldKind::Select { options: SEASONS },
    },
];

// ============================================================================
// Form Profiles
// ============================================================================

/// A field as it appears in a particular form variant.
#[derive(Debug, Clone, Copy)]
pub struct ProfileField {
    pub spec: &'static FieldSpec,
    pub required: bool,
}

/// A named subset of the field table with per-field required-ness.
///
/// Both form variants validate through the same code path; only the profile
/// differs.
#[derive(Debug, Clone)]
pub struct FormProfile {
    pub name: &'static str,
    fields: Vec<ProfileField>,
}

impl FormProfile {
    /// The four-field soil sampling form. All fields required.
    pub fn minimal() -> Self {
        FormProfile {
            name: "minimal",
            fields: ["potassium", "nitrogen", "phosphorus", "pH"]
                .iter()
                .map(|name| ProfileField {
                    spec: FieldSpec::by_name(name).expect("field table entry"),
                    required: true,
                })
                .collect(),
        }
    }

    /// The full dashboard form. Potassium, nitrogen and crop type are
    /// required; everything else is validated only when a value is present.
    pub fn dashboard() -> Self {
        let required = ["potassium", "nitrogen", "cropType"];
        FormProfile {
            name: "dashboard",
            fields: FIELD_SPECS
                .iter()
                .map(|spec| ProfileField {
                    spec,
                    required: required.contains(&spec.name),
                })
                .collect(),
        }
    }

    pub fn fields(&self) -> &[ProfileField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&ProfileField> {
        self.fields.iter().find(|f| f.spec.name == name)
    }

    /// Names of the fields this profile requires.
    pub fn required_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.spec.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let spec = FieldSpec::by_name("potassium").unwrap();
        assert_eq!(spec.kind.range(), Some((0.0, 2000.0)));
        assert!(FieldSpec::by_name("magnesium").is_none());
    }

    #[test]
    fn test_minimal_profile_all_required() {
        let profile = FormProfile::minimal();
        assert_eq!(profile.fields().len(), 4);
        assert!(profile.fields().iter().all(|f| f.required));
        assert_eq!(profile.required_names().count(), 4);
    }

    #[test]
    fn test_dashboard_profile_covers_full_table() {
        let profile = FormProfile::dashboard();
        assert_eq!(profile.fields().len(), FIELD_SPECS.len());

        let required: Vec<_> = profile.required_names().collect();
        assert_eq!(required, vec!["potassium", "nitrogen", "cropType"]);

        // Optional numeric fields keep their ranges for when a value is given
        let ph = profile.field("pH").unwrap();
        assert!(!ph.required);
        assert_eq!(ph.spec.kind.range(), Some((0.0, 14.0)));
    }
}
