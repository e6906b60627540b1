//! Analysis runner
//!
//! Uploads one file at a time through an [`AnalysisApi`] and persists the
//! result. A second call while one is running fails with
//! [`AnalysisError::InProgress`].

use crate::adapters::analysis::{AnalysisApi, UploadFile};
use crate::core::state::StateManager;
use crate::domain::{AnalysisError, AnalysisPayload, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of a successful analysis
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub payload: AnalysisPayload,
    pub file_name: String,
    pub feature_count: usize,
    pub duration: Duration,
}

/// Runs analyses and stores their results
pub struct AnalysisRunner {
    api: Arc<dyn AnalysisApi>,
    state: Arc<StateManager>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AnalysisRunner {
    pub fn new(api: Arc<dyn AnalysisApi>, state: Arc<StateManager>) -> Self {
        Self {
            api,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while an analysis is running
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Upload `file`, persist the result and return it
    ///
    /// On failure the previously stored result is left untouched.
    pub async fn run(&self, file: &UploadFile) -> Result<AnalysisOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AnalysisError::InProgress.into());
        }
        let _guard = InFlightGuard(&self.in_flight);

        crate::log_analysis_start!(file.file_name(), file.len());
        let start = Instant::now();

        let payload = match self.api.analyze(file).await {
            Ok(payload) => payload,
            Err(e) => {
                crate::log_error_with_context!(e, "analysis upload", file.file_name());
                return Err(e);
            }
        };

        self.state.save_analysis(&payload, file.file_name())?;

        let feature_count = payload.features().len();
        let duration = start.elapsed();
        crate::log_analysis_complete!(
            file.file_name(),
            feature_count,
            duration.as_millis() as u64
        );

        Ok(AnalysisOutcome {
            payload,
            file_name: file.file_name().to_string(),
            feature_count,
            duration,
        })
    }
}
