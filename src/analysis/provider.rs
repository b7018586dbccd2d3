//! Result provider
//!
//! `ResultProvider` is the seam between the dashboard and whatever produces
//! its numbers. The only implementation here is the mock generator; it draws
//! every figure from fixed bands and never looks at the submitted readings,
//! but the request still carries them so a real backend can.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::types::{
    AlertKind, AnalysisResult, ClimateAlert, CurrentWeather, DiseaseDetection, DiseaseFinding,
    IrrigationPlan, NutrientScores, ScheduledWatering, Severity, SoilHealth, WateringStatus,
    YieldPrediction, YieldTrend,
};
use crate::form::FormState;

/// Validated snapshot of a submission, handed to the provider.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub potassium_ppm: Option<f64>,
    pub nitrogen_ppm: Option<f64>,
    pub phosphorus_ppm: Option<f64>,
    pub ph: Option<f64>,
    pub ec_ds_per_m: Option<f64>,
    pub organic_carbon_pct: Option<f64>,

    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub solar_radiation: Option<f64>,
    pub wind_speed_kmh: Option<f64>,

    pub crop_type: Option<String>,
    pub planting_date: Option<NaiveDate>,
    pub growth_stage: Option<String>,
    pub irrigation_freq: Option<String>,
    pub region: Option<String>,
    pub season: Option<String>,

    /// Whether a leaf image is attached. Drives disease detection state.
    pub has_disease_image: bool,
}

impl AnalysisRequest {
    /// Snapshot a validated form. Unparseable optional values read as absent.
    pub fn from_form(form: &FormState, has_disease_image: bool) -> Self {
        let values = form.values();
        let text = |name: &str| -> Option<String> {
            values
                .get(name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        AnalysisRequest {
            potassium_ppm: values.parsed("potassium"),
            nitrogen_ppm: values.parsed("nitrogen"),
            phosphorus_ppm: values.parsed("phosphorus"),
            ph: values.parsed("pH"),
            ec_ds_per_m: values.parsed("EC"),
            organic_carbon_pct: values.parsed("OC"),
            temperature_c: values.parsed("temperature"),
            humidity_pct: values.parsed("humidity"),
            rainfall_mm: values.parsed("rainfall"),
            solar_radiation: values.parsed("solarRadiation"),
            wind_speed_kmh: values.parsed("windSpeed"),
            crop_type: text("cropType"),
            planting_date: text("plantingDate")
                .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok()),
            growth_stage: text("growthStage"),
            irrigation_freq: text("irrigationFreq"),
            region: text("region"),
            season: text("season"),
            has_disease_image,
        }
    }
}

/// Produces an `AnalysisResult` for a validated submission.
pub trait ResultProvider: Send + Sync {
    fn generate(&self, request: &AnalysisRequest) -> AnalysisResult;
}

// ============================================================================
// Mock generator
// ============================================================================

/// Baseline for the six-month yield history (tons/ha).
const HISTORICAL_BASELINE: [f64; 6] = [3.2, 3.8, 4.1, 4.5, 4.2, 4.8];

const DISEASES: [&str; 4] = ["Healthy", "Leaf Spot", "Rust", "Blight"];

const SEVERITIES: [Severity; 3] = [Severity::Low, Severity::Moderate, Severity::High];

const SOIL_RECOMMENDATIONS: [&str; 3] = [
    "Add organic compost to improve soil structure",
    "Consider lime application to adjust pH",
    "Implement crop rotation for better nutrient cycling",
];

/// Stand-in for the absent inference backend.
///
/// Fixed-band random generation; seedable for deterministic tests.
pub struct MockAnalysisProvider {
    rng: Mutex<StdRng>,
}

impl MockAnalysisProvider {
    pub fn new() -> Self {
        MockAnalysisProvider {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        MockAnalysisProvider {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn climate_alerts() -> Vec<ClimateAlert> {
        vec![
            ClimateAlert {
                kind: AlertKind::Warning,
                icon: "🌡️".to_string(),
                title: "Heat Wave Alert".to_string(),
                description: "High temperatures expected for next 5 days".to_string(),
                severity: Severity::Moderate,
                action: "Increase irrigation frequency".to_string(),
            },
            ClimateAlert {
                kind: AlertKind::Info,
                icon: "🌧️".to_string(),
                title: "Rainfall Forecast".to_string(),
                description: "Light showers expected this weekend".to_string(),
                severity: Severity::Low,
                action: "Reduce irrigation schedule".to_string(),
            },
            ClimateAlert {
                kind: AlertKind::Success,
                icon: "🌤️".to_string(),
                title: "Optimal Conditions".to_string(),
                description: "Perfect growing conditions for next week".to_string(),
                severity: Severity::Low,
                action: "Maintain current practices".to_string(),
            },
        ]
    }

    fn weekly_schedule() -> Vec<ScheduledWatering> {
        [
            ("Mon", 25, WateringStatus::Completed),
            ("Wed", 30, WateringStatus::Scheduled),
            ("Fri", 25, WateringStatus::Scheduled),
            ("Sun", 20, WateringStatus::Scheduled),
        ]
        .into_iter()
        .map(|(day, amount_liters, status)| ScheduledWatering {
            day: day.to_string(),
            amount_liters,
            status,
        })
        .collect()
    }
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultProvider for MockAnalysisProvider {
    fn generate(&self, request: &AnalysisRequest) -> AnalysisResult {
        let mut rng = self.rng.lock().expect("mock provider rng lock poisoned");
        let rng = &mut *rng;

        let yield_prediction = YieldPrediction {
            // Uniform in [4.0, 7.0), one decimal place
            predicted_tons_per_ha: ((rng.gen::<f64>() * 3.0 + 4.0) * 10.0).round() / 10.0,
            confidence_pct: rng.gen_range(85..100),
            trend: if rng.gen_bool(0.5) {
                YieldTrend::Increasing
            } else {
                YieldTrend::Stable
            },
            historical: HISTORICAL_BASELINE
                .iter()
                .map(|v| v + rng.gen::<f64>() * 0.5)
                .collect(),
        };

        let current_weather = CurrentWeather {
            temperature_c: rng.gen_range(25..35),
            humidity_pct: rng.gen_range(60..80),
            wind_speed_kmh: rng.gen_range(5..15),
            uv_index: rng.gen_range(6..11),
        };

        let irrigation = IrrigationPlan {
            soil_moisture_pct: rng.gen_range(40..70),
            recommendation: if rng.gen_bool(0.4) {
                "Increase irrigation by 20%".to_string()
            } else {
                "Maintain current schedule".to_string()
            },
            next_watering: if rng.gen_bool(0.5) {
                "Tomorrow morning".to_string()
            } else {
                "In 2 days".to_string()
            },
            efficiency_pct: rng.gen_range(75..95),
            weekly_schedule: Self::weekly_schedule(),
        };

        let disease_detection = if request.has_disease_image {
            DiseaseDetection::Analyzed {
                result: DiseaseFinding {
                    disease: DISEASES[rng.gen_range(0..DISEASES.len())].to_string(),
                    confidence_pct: rng.gen_range(80..100),
                    severity: SEVERITIES[rng.gen_range(0..SEVERITIES.len())],
                    treatment: "Apply fungicide spray every 7 days".to_string(),
                    affected_area_pct: rng.gen_range(5..20),
                },
            }
        } else {
            DiseaseDetection::Pending
        };

        let soil_health = SoilHealth {
            overall_score: rng.gen_range(70..95),
            nutrients: NutrientScores {
                nitrogen: rng.gen_range(65..95),
                phosphorus: rng.gen_range(60..95),
                potassium: rng.gen_range(75..95),
            },
            recommendations: SOIL_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        };

        AnalysisResult {
            yield_prediction,
            climate_alerts: Self::climate_alerts(),
            current_weather,
            irrigation,
            disease_detection,
            soil_health,
            generated_at: Utc::now(),
        }
    }
}

/// One live-sensor tick: rewrite ambient temperature, humidity and soil
/// moisture in place. Everything else in the result is left untouched.
pub fn refresh_live_readings(result: &mut AnalysisResult, rng: &mut impl Rng) {
    result.current_weather.temperature_c = rng.gen_range(25..35);
    result.current_weather.humidity_pct = rng.gen_range(60..80);
    result.irrigation.soil_moisture_pct = rng.gen_range(40..70);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FormProfile;

    fn request_with_image(has_disease_image: bool) -> AnalysisRequest {
        AnalysisRequest {
            potassium_ppm: Some(150.0),
            nitrogen_ppm: Some(80.0),
            crop_type: Some("rice".to_string()),
            has_disease_image,
            ..AnalysisRequest::default()
        }
    }

    #[test]
    fn test_generated_values_stay_in_bands() {
        let provider = MockAnalysisProvider::with_seed(7);

        for _ in 0..50 {
            let result = provider.generate(&request_with_image(false));

            let y = result.yield_prediction.predicted_tons_per_ha;
            assert!((4.0..=7.0).contains(&y), "yield out of band: {}", y);
            assert!((85..100).contains(&(result.yield_prediction.confidence_pct as i32)));
            assert_eq!(result.yield_prediction.historical.len(), 6);

            assert!((25..35).contains(&result.current_weather.temperature_c));
            assert!((60..80).contains(&result.current_weather.humidity_pct));
            assert!((5..15).contains(&result.current_weather.wind_speed_kmh));
            assert!((6..11).contains(&result.current_weather.uv_index));

            assert!((40..70).contains(&result.irrigation.soil_moisture_pct));
            assert!((75..95).contains(&result.irrigation.efficiency_pct));

            assert!((70..95).contains(&result.soil_health.overall_score));
            assert!((65..95).contains(&result.soil_health.nutrients.nitrogen));
            assert!((60..95).contains(&result.soil_health.nutrients.phosphorus));
            assert!((75..95).contains(&result.soil_health.nutrients.potassium));
        }
    }

    #[test]
    fn test_historical_tracks_baseline() {
        let provider = MockAnalysisProvider::with_seed(11);
        let result = provider.generate(&request_with_image(false));

        for (value, baseline) in result
            .yield_prediction
            .historical
            .iter()
            .zip(HISTORICAL_BASELINE)
        {
            assert!(*value >= baseline && *value < baseline + 0.5);
        }
    }

    #[test]
    fn test_yield_rounded_to_one_decimal() {
        use approx::assert_relative_eq;

        let provider = MockAnalysisProvider::with_seed(13);
        for _ in 0..20 {
            let y = provider
                .generate(&request_with_image(false))
                .yield_prediction
                .predicted_tons_per_ha;
            assert_relative_eq!(y * 10.0, (y * 10.0).round(), max_relative = 1e-9);
        }
    }

    #[test]
    fn test_disease_detection_requires_image() {
        let provider = MockAnalysisProvider::with_seed(3);

        let without = provider.generate(&request_with_image(false));
        assert!(!without.disease_detection.is_analyzed());

        let with = provider.generate(&request_with_image(true));
        match with.disease_detection {
            DiseaseDetection::Analyzed { result } => {
                assert!(DISEASES.contains(&result.disease.as_str()));
                assert!((80..100).contains(&(result.confidence_pct as i32)));
                assert!((5..20).contains(&(result.affected_area_pct as i32)));
            }
            DiseaseDetection::Pending => panic!("image attached but detection pending"),
        }
    }

    #[test]
    fn test_refresh_touches_only_live_readings() {
        let provider = MockAnalysisProvider::with_seed(5);
        let mut result = provider.generate(&request_with_image(false));
        let before = result.clone();

        let mut rng = StdRng::seed_from_u64(99);
        refresh_live_readings(&mut result, &mut rng);

        assert!((25..35).contains(&result.current_weather.temperature_c));
        assert!((60..80).contains(&result.current_weather.humidity_pct));
        assert!((40..70).contains(&result.irrigation.soil_moisture_pct));

        // Untouched regions are bit-identical
        assert_eq!(
            result.yield_prediction.predicted_tons_per_ha,
            before.yield_prediction.predicted_tons_per_ha
        );
        assert_eq!(result.current_weather.wind_speed_kmh, before.current_weather.wind_speed_kmh);
        assert_eq!(result.irrigation.recommendation, before.irrigation.recommendation);
        assert_eq!(result.soil_health.overall_score, before.soil_health.overall_score);
        assert_eq!(result.generated_at, before.generated_at);
    }

    #[test]
    fn test_request_snapshot_from_form() {
        let mut form = crate::form::FormState::new(FormProfile::dashboard());
        form.update_field("potassium", "150");
        form.update_field("nitrogen", "80");
        form.update_field("cropType", "rice");
        form.update_field("plantingDate", "2025-06-15");

        let request = AnalysisRequest::from_form(&form, true);
        assert_eq!(request.potassium_ppm, Some(150.0));
        assert_eq!(request.nitrogen_ppm, Some(80.0));
        assert_eq!(request.crop_type.as_deref(), Some("rice"));
        assert_eq!(
            request.planting_date,
            NaiveDate::from_ymd_opt(2025, 6, 15)
        );
        assert_eq!(request.rainfall_mm, None);
        assert_eq!(request.region, None);
        assert!(request.has_disease_image);
    }
}
