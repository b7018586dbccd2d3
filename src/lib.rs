//! AgriMitra Core
//!
//! Form state, validation and mock analysis for the agricultural dashboard.
//!
//! The crate is the logic layer under a view: it holds raw field values,
//! validates them against a single field-specification table, and on a clean
//! submission runs a simulated analysis (fixed delay, random figures in fixed
//! bands) whose results the view's display regions bind to. A repeating
//! interval rewrites the live sensor readings while results are shown and is
//! torn down with the view.
//!
//! - `fields`: the field table and the two form profiles
//! - `form`: values, edit policy and the range validator
//! - `analysis`: result records and the pluggable provider (mock by default)
//! - `session`: the Input -> Loading -> Results flow and its timers
//! - `attachment`: local-preview image handling
//! - `samples`: the in-memory soil sample log

pub mod analysis;
pub mod attachment;
pub mod fields;
pub mod form;
pub mod samples;
pub mod session;

// Re-export commonly used types
pub use analysis::{AnalysisRequest, AnalysisResult, MockAnalysisProvider, ResultProvider};
pub use attachment::{AttachmentError, ImageAttachment};
pub use fields::{FieldKind, FieldSpec, FormProfile, FIELD_SPECS};
pub use form::{EditPolicy, FieldError, FormState, ValidationErrors};
pub use samples::{SampleLog, SampleLogError, SoilSample, SoilSampleDraft, SoilSamplePatch};
pub use session::{ActiveTab, DashboardSession, Phase, SessionConfig, SubmitOutcome};

/// Initialize structured logging for an embedding binary.
///
/// Honors `RUST_LOG`; defaults to info for this crate, warn for everything
/// else. tracing-subscriber rejects double initialization, so the host
/// application should call this once at startup.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agrimitra_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
