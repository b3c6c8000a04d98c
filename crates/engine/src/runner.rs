//! Simulation run orchestration.
//!
//! `SimulationRunner` is the piece a UI or service talks to:
//! 1. Records a new `in_progress` run in the shared history.
//! 2. Hands the workflow to a `SimulationBackend`.
//! 3. Finishes the run as `success`/`failure` from the result, or as a
//!    `failure` carrying a fixed message if the backend itself failed.
//! 4. Attaches duration and size metrics.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::error::RUN_FAILED_MESSAGE;
use crate::runs::{RunHistory, RunId, RunOutcome, RunRecord, Workload, DEFAULT_HISTORY_CAPACITY};
use crate::simulator::{simulate, SimulationResult};
use crate::{RunError, WorkflowData};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Maximum number of runs kept in history.
    pub history_capacity: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { history_capacity: DEFAULT_HISTORY_CAPACITY }
    }
}

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// Anything that can turn a workflow into a `SimulationResult`.
///
/// The in-process engine never fails; remote transports can.
#[async_trait]
pub trait SimulationBackend: Send + Sync {
    async fn simulate(&self, workflow: &WorkflowData) -> Result<SimulationResult, RunError>;
}

/// Calls [`simulate`] directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend;

#[async_trait]
impl SimulationBackend for LocalBackend {
    async fn simulate(&self, workflow: &WorkflowData) -> Result<SimulationResult, RunError> {
        Ok(simulate(workflow))
    }
}

// ---------------------------------------------------------------------------
// SimulationRunner
// ---------------------------------------------------------------------------

/// Runs simulations and owns their history.
///
/// Cheap to clone; clones share the same history.
#[derive(Clone)]
pub struct SimulationRunner {
    backend: Arc<dyn SimulationBackend>,
    history: Arc<Mutex<RunHistory>>,
}

impl SimulationRunner {
    pub fn new(backend: Arc<dyn SimulationBackend>, config: RunnerConfig) -> Self {
        Self {
            backend,
            history: Arc::new(Mutex::new(RunHistory::with_capacity(config.history_capacity))),
        }
    }

    /// A runner backed by the in-process engine.
    pub fn local(config: RunnerConfig) -> Self {
        Self::new(Arc::new(LocalBackend), config)
    }

    /// Simulate `workflow` as a new run and return the finished record.
    ///
    /// Never fails: backend errors become a `failure` record.
    #[instrument(skip(self, workflow), fields(nodes = workflow.nodes.len(), edges = workflow.edges.len()))]
    pub async fn run(&self, workflow: &WorkflowData) -> RunRecord {
        let started_at = Utc::now();
        let id = self.lock().begin(started_at);
        info!(run_id = %id, "simulation run started");

        let outcome = match self.backend.simulate(workflow).await {
            Ok(result) => {
                info!(
                    run_id = %id,
                    success = result.success,
                    steps = result.steps.len(),
                    errors = result.errors.len(),
                    "simulation finished"
                );
                RunOutcome::Completed(result)
            }
            Err(err) => {
                warn!(run_id = %id, "simulation backend failed: {}", err);
                RunOutcome::Failed(RUN_FAILED_MESSAGE.to_owned())
            }
        };

        let workload = Workload {
            node_count: workflow.nodes.len(),
            edge_count: workflow.edges.len(),
        };
        let finished_at = Utc::now();

        match self.lock().finish(id, outcome.clone(), finished_at, workload) {
            Some(record) => record,
            None => {
                // Evicted or cleared while in flight; the caller still gets its record.
                warn!(run_id = %id, "run left history before it finished");
                let mut record = RunRecord::in_progress(id, started_at);
                record.finish(outcome, finished_at, workload);
                record
            }
        }
    }

    /// All runs, oldest first.
    pub fn history(&self) -> Vec<RunRecord> {
        self.lock().list()
    }

    pub fn get(&self, id: RunId) -> Option<RunRecord> {
        self.lock().get(id).cloned()
    }

    pub fn clear_history(&self) {
        self.lock().clear();
        info!("run history cleared");
    }

    fn lock(&self) -> MutexGuard<'_, RunHistory> {
        // History stays usable even if a holder panicked mid-update.
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
