//! Dashboard session
//!
//! Drives the submit flow: Input -> (valid submit) -> Loading -> (analysis
//! delay) -> Results, with validation failures keeping the machine in Input.
//! While results are displayed a repeating interval rewrites the live sensor
//! readings; the interval is held as a guard that aborts its task on drop, so
//! it is cancelled on reset, on a new submission and on session teardown.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::analysis::{refresh_live_readings, AnalysisRequest, AnalysisResult, ResultProvider};
use crate::attachment::ImageAttachment;
use crate::fields::FormProfile;
use crate::form::{EditPolicy, FormState, ValidationErrors};

/// Where the session is in the submit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collecting input. Initial state; re-entered from Results.
    Input,
    /// A submission was accepted and the analysis delay is running.
    Loading,
    /// Results are available and displayed.
    Results,
}

/// Which tab the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Input,
    Results,
}

/// Session timing and form behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Fixed delay standing in for analysis latency.
    pub analysis_delay: Duration,

    /// Cadence of the live sensor refresh while results are shown.
    pub refresh_interval: Duration,

    pub edit_policy: EditPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            analysis_delay: Duration::from_secs(3),
            refresh_interval: Duration::from_secs(5),
            edit_policy: EditPolicy::default(),
        }
    }
}

/// Outcome of a submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; the errors are also stored on the form. The
    /// session stays in Input with no other side effect.
    Rejected(ValidationErrors),

    /// Analysis ran and results are displayed.
    Completed,
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed)
    }
}

struct SessionState {
    form: FormState,
    phase: Phase,
    tab: ActiveTab,
    results: Option<AnalysisResult>,
    attachment: Option<ImageAttachment>,
    phase_tx: watch::Sender<Phase>,
}

impl SessionState {
    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        // Receivers may all be gone; that's fine.
        let _ = self.phase_tx.send(phase);
    }
}

/// Owns form state, the submit flow and the live-refresh task.
pub struct DashboardSession {
    state: Arc<Mutex<SessionState>>,
    provider: Arc<dyn ResultProvider>,
    config: SessionConfig,
    phase_rx: watch::Receiver<Phase>,
    refresh: Option<RefreshTask>,
}

impl DashboardSession {
    pub fn new(
        profile: FormProfile,
        provider: Arc<dyn ResultProvider>,
        config: SessionConfig,
    ) -> Self {
        let (phase_tx, phase_rx) = watch::channel(Phase::Input);
        let form = FormState::with_policy(profile, config.edit_policy);

        DashboardSession {
            state: Arc::new(Mutex::new(SessionState {
                form,
                phase: Phase::Input,
                tab: ActiveTab::Input,
                results: None,
                attachment: None,
                phase_tx,
            })),
            provider,
            config,
            phase_rx,
            refresh: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state lock poisoned")
    }

    // ------------------------------------------------------------------
    // Form operations
    // ------------------------------------------------------------------

    pub fn update_field(&self, field: &str, value: &str) {
        self.lock().form.update_field(field, value);
    }

    pub fn value(&self, field: &str) -> Option<String> {
        self.lock().form.value(field).map(str::to_string)
    }

    pub fn error_message(&self, field: &str) -> Option<String> {
        self.lock().form.error_message(field).map(str::to_string)
    }

    pub fn validation_errors(&self) -> ValidationErrors {
        self.lock().form.errors().clone()
    }

    /// Clear all field values, errors, results and the attachment; stop the
    /// live refresh; return to Input.
    pub fn reset(&mut self) {
        self.refresh.take();
        let mut state = self.lock();
        state.form.reset();
        state.results = None;
        state.attachment = None;
        state.tab = ActiveTab::Input;
        state.set_phase(Phase::Input);
        tracing::debug!("session reset");
    }

    // ------------------------------------------------------------------
    // Attachment
    // ------------------------------------------------------------------

    pub fn attach_disease_image(&self, attachment: ImageAttachment) {
        tracing::debug!(file = %attachment.file_name, "disease image attached");
        self.lock().attachment = Some(attachment);
    }

    pub fn clear_disease_image(&self) {
        self.lock().attachment = None;
    }

    pub fn disease_image(&self) -> Option<ImageAttachment> {
        self.lock().attachment.clone()
    }

    // ------------------------------------------------------------------
    // Submit flow
    // ------------------------------------------------------------------

    /// Validate and, if clean, run the analysis flow to completion.
    ///
    /// On validation failure the session stays in Input and the errors are
    /// returned (and stored for the view). On success the session passes
    /// through Loading for the configured delay; the delay is not
    /// cancellable once started.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let request = {
            let mut state = self.lock();
            if !state.form.validate() {
                let errors = state.form.errors().clone();
                tracing::debug!(failing_fields = errors.len(), "submission rejected");
                return SubmitOutcome::Rejected(errors);
            }

            let request = AnalysisRequest::from_form(&state.form, state.attachment.is_some());
            state.set_phase(Phase::Loading);
            request
        };

        // A new run supersedes any refresh loop from the previous one.
        self.refresh.take();

        tracing::info!("analysis started");
        tokio::time::sleep(self.config.analysis_delay).await;

        let result = self.provider.generate(&request);
        tracing::info!(
            yield_tons_per_ha = result.yield_prediction.predicted_tons_per_ha,
            "analysis complete"
        );

        {
            let mut state = self.lock();
            state.results = Some(result);
            state.tab = ActiveTab::Results;
            state.set_phase(Phase::Results);
        }

        self.refresh = Some(RefreshTask::spawn(
            Arc::clone(&self.state),
            self.config.refresh_interval,
        ));

        SubmitOutcome::Completed
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Watch phase transitions without holding the session.
    pub fn phase_watch(&self) -> watch::Receiver<Phase> {
        self.phase_rx.clone()
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.lock().tab
    }

    /// Switch tabs. The Results tab is only selectable once results exist;
    /// returns whether the switch happened.
    pub fn select_tab(&self, tab: ActiveTab) -> bool {
        let mut state = self.lock();
        match tab {
            ActiveTab::Input => {
                state.tab = ActiveTab::Input;
                if state.phase == Phase::Results {
                    state.set_phase(Phase::Input);
                }
                true
            }
            ActiveTab::Results => {
                if state.results.is_some() {
                    state.tab = ActiveTab::Results;
                    state.set_phase(Phase::Results);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn results(&self) -> Option<AnalysisResult> {
        self.lock().results.clone()
    }
}

// ============================================================================
// Live refresh task
// ============================================================================

/// Guard for the repeating sensor-refresh task. Dropping it aborts the task,
/// so the interval can never outlive the results it mutates.
struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    fn spawn(state: Arc<Mutex<SessionState>>, every: Duration) -> Self {
        tracing::debug!(interval_ms = every.as_millis() as u64, "live refresh started");

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // First tick completes immediately; skip it so the initial
            // readings stay on screen for a full interval.
            interval.tick().await;

            let mut rng = StdRng::from_entropy();
            loop {
                interval.tick().await;

                let mut state = state.lock().expect("session state lock poisoned");
                match state.results.as_mut() {
                    Some(results) => refresh_live_readings(results, &mut rng),
                    None => break,
                }
            }
        });

        RefreshTask { handle }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("live refresh stopped");
    }
}
