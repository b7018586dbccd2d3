//! Result record types
//!
//! The display regions of the results view bind directly to these records.
//! Everything serializes so a view layer (or a snapshot test) can consume
//! them as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of the predicted yield trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldTrend {
    Increasing,
    Stable,
}

impl YieldTrend {
    pub fn display_text(&self) -> &'static str {
        match self {
            YieldTrend::Increasing => "increasing",
            YieldTrend::Stable => "stable",
        }
    }
}

/// Predicted yield with confidence and recent history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldPrediction {
    /// Predicted yield in tons per hectare, one decimal place.
    pub predicted_tons_per_ha: f64,

    /// Model confidence, percent.
    pub confidence_pct: u8,

    pub trend: YieldTrend,

    /// Monthly yield figures, oldest first (six months).
    pub historical: Vec<f64>,
}

/// Alert classification for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Info,
    Success,
}

/// How urgent an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    pub fn display_text(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
        }
    }
}

/// A climate alert card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateAlert {
    pub kind: AlertKind,
    pub icon: String, // "🌡️", "🌧️", "🌤️"
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// Suggested grower action.
    pub action: String,
}

/// Ambient weather snapshot shown beside the alerts.
///
/// Temperature and humidity are the two fields the live refresh overwrites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: i32,
    pub humidity_pct: i32,
    pub wind_speed_kmh: i32,
    pub uv_index: i32,
}

/// Completion state of one day's watering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WateringStatus {
    Completed,
    Scheduled,
}

impl WateringStatus {
    pub fn display_text(&self) -> &'static str {
        match self {
            WateringStatus::Completed => "completed",
            WateringStatus::Scheduled => "scheduled",
        }
    }
}

/// One entry of the weekly watering schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledWatering {
    pub day: String, // "Mon", "Wed", ...
    pub amount_liters: u32,
    pub status: WateringStatus,
}

/// Irrigation guidance. Soil moisture is live-refreshed while displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationPlan {
    pub soil_moisture_pct: i32,
    pub recommendation: String,
    pub next_watering: String,
    pub efficiency_pct: i32,
    pub weekly_schedule: Vec<ScheduledWatering>,
}

/// Outcome of the leaf-image analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DiseaseDetection {
    /// No image was attached to the submission.
    Pending,
    /// An image was attached and a finding was produced.
    Analyzed { result: DiseaseFinding },
}

impl DiseaseDetection {
    pub fn is_analyzed(&self) -> bool {
        matches!(self, DiseaseDetection::Analyzed { .. })
    }
}

/// A single disease finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseFinding {
    pub disease: String, // "Healthy", "Leaf Spot", "Rust", "Blight"
    pub confidence_pct: u8,
    pub severity: Severity,
    pub treatment: String,
    pub affected_area_pct: u8,
}

/// Per-nutrient soil scores, percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientScores {
    pub nitrogen: i32,
    pub phosphorus: i32,
    pub potassium: i32,
}

/// Soil health breakdown with improvement advice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilHealth {
    /// Overall score, percent.
    pub overall_score: i32,
    pub nutrients: NutrientScores,
    pub recommendations: Vec<String>,
}

/// Everything one analysis run produces.
///
/// Created once per successful submission, optionally live-refreshed while
/// displayed, discarded when the session is torn down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub yield_prediction: YieldPrediction,
    pub climate_alerts: Vec<ClimateAlert>,
    pub current_weather: CurrentWeather,
    pub irrigation: IrrigationPlan,
    pub disease_detection: DiseaseDetection,
    pub soil_health: SoilHealth,
    pub generated_at: DateTime<Utc>,
}
