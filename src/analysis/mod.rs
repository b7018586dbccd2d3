//! Analysis Results
//!
//! Record types for one analysis run (yield, climate, irrigation, disease,
//! soil health) plus the pluggable provider that produces them. The default
//! provider is the mock generator; a real inference backend can be swapped in
//! behind the same trait without touching form or validation code.

pub mod provider;
pub mod types;

pub use provider::{refresh_live_readings, AnalysisRequest, MockAnalysisProvider, ResultProvider};
pub use types::{
    AlertKind, AnalysisResult, ClimateAlert, CurrentWeather, DiseaseDetection, DiseaseFinding,
    IrrigationPlan, NutrientScores, ScheduledWatering, Severity, SoilHealth, WateringStatus,
    YieldPrediction, YieldTrend,
};
