//! Soil sample log
//!
//! In-memory register of submitted soil samples: create, list (newest
//! first), fetch, partial update and delete, all validated against the same
//! four soil ranges as the form. Entries live only as long as the process;
//! there is no persistence layer.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::fields::FormProfile;
use crate::form::{validate, FormValues, ValidationErrors};

/// A recorded soil sample.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SoilSample {
    pub id: u64,
    pub potassium: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub ph: f64,
    pub created_at: DateTime<Utc>,
}

/// Readings for a new sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilSampleDraft {
    pub potassium: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub ph: f64,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoilSamplePatch {
    pub potassium: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub ph: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleLogError {
    #[error("sample validation failed")]
    Validation(ValidationErrors),

    #[error("no sample with id {0}")]
    NotFound(u64),
}

/// The in-memory sample register.
#[derive(Debug, Default)]
pub struct SampleLog {
    samples: Vec<SoilSample>,
    next_id: u64,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a sample, returning the stored entry.
    pub fn create(&mut self, draft: SoilSampleDraft) -> Result<SoilSample, SampleLogError> {
        check_readings(draft.potassium, draft.nitrogen, draft.phosphorus, draft.ph)?;

        self.next_id += 1;
        let sample = SoilSample {
            id: self.next_id,
            potassium: draft.potassium,
            nitrogen: draft.nitrogen,
            phosphorus: draft.phosphorus,
            ph: draft.ph,
            created_at: Utc::now(),
        };
        tracing::debug!(id = sample.id, "soil sample recorded");
        self.samples.push(sample.clone());
        Ok(sample)
    }

    /// All samples, newest first.
    pub fn list(&self) -> Vec<SoilSample> {
        let mut samples = self.samples.clone();
        samples.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        samples
    }

    pub fn get(&self, id: u64) -> Result<&SoilSample, SampleLogError> {
        self.samples
            .iter()
            .find(|s| s.id == id)
            .ok_or(SampleLogError::NotFound(id))
    }

    /// Apply a partial update, re-validating the resulting readings.
    pub fn update(&mut self, id: u64, patch: SoilSamplePatch) -> Result<SoilSample, SampleLogError> {
        let index = self
            .samples
            .iter()
            .position(|s| s.id == id)
            .ok_or(SampleLogError::NotFound(id))?;

        let current = &self.samples[index];
        let potassium = patch.potassium.unwrap_or(current.potassium);
        let nitrogen = patch.nitrogen.unwrap_or(current.nitrogen);
        let phosphorus = patch.phosphorus.unwrap_or(current.phosphorus);
        let ph = patch.ph.unwrap_or(current.ph);

        check_readings(potassium, nitrogen, phosphorus, ph)?;

        let sample = &mut self.samples[index];
        sample.potassium = potassium;
        sample.nitrogen = nitrogen;
        sample.phosphorus = phosphorus;
        sample.ph = ph;
        Ok(sample.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<(), SampleLogError> {
        let index = self
            .samples
            .iter()
            .position(|s| s.id == id)
            .ok_or(SampleLogError::NotFound(id))?;
        self.samples.remove(index);
        tracing::debug!(id, "soil sample deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Run the four readings through the minimal-profile validator.
fn check_readings(
    potassium: f64,
    nitrogen: f64,
    phosphorus: f64,
    ph: f64,
) -> Result<(), SampleLogError> {
    let mut values = FormValues::new();
    values.set("potassium", &potassium.to_string());
    values.set("nitrogen", &nitrogen.to_string());
    values.set("phosphorus", &phosphorus.to_string());
    values.set("pH", &ph.to_string());

    let errors = validate(&values, &FormProfile::minimal());
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SampleLogError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SoilSampleDraft {
        SoilSampleDraft {
            potassium: 150.0,
            nitrogen: 80.0,
            phosphorus: 40.0,
            ph: 6.5,
        }
    }

    #[test]
    fn test_create_and_get() {
        let mut log = SampleLog::new();
        let sample = log.create(draft()).unwrap();
        assert_eq!(sample.id, 1);
        assert_eq!(log.get(1).unwrap().potassium, 150.0);
    }

    #[test]
    fn test_create_rejects_out_of_range() {
        let mut log = SampleLog::new();
        let result = log.create(SoilSampleDraft {
            potassium: 2500.0,
            ..draft()
        });

        match result {
            Err(SampleLogError::Validation(errors)) => {
                assert!(errors.contains("potassium"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_list_newest_first() {
        let mut log = SampleLog::new();
        let first = log.create(draft()).unwrap();
        let second = log.create(draft()).unwrap();

        let listed = log.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn test_patch_revalidates() {
        let mut log = SampleLog::new();
        let sample = log.create(draft()).unwrap();

        let updated = log
            .update(sample.id, SoilSamplePatch { ph: Some(7.2), ..Default::default() })
            .unwrap();
        assert_eq!(updated.ph, 7.2);
        assert_eq!(updated.potassium, 150.0);

        let rejected = log.update(
            sample.id,
            SoilSamplePatch { nitrogen: Some(900.0), ..Default::default() },
        );
        assert!(matches!(rejected, Err(SampleLogError::Validation(_))));

        // Failed patch leaves the record untouched
        assert_eq!(log.get(sample.id).unwrap().nitrogen, 80.0);
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let mut log = SampleLog::new();
        assert_eq!(log.delete(404), Err(SampleLogError::NotFound(404)));

        let sample = log.create(draft()).unwrap();
        assert!(log.delete(sample.id).is_ok());
        assert!(log.is_empty());
    }
}
