//! Simulation run records and the bounded run history.
//!
//! A run starts `in_progress` and is finished exactly once, as `success` or
//! `failure`. Runs are addressed by their own [`RunId`] so that several can
//! be in flight at the same time.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::simulator::SimulationResult;

/// Number of runs kept when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

// ---------------------------------------------------------------------------
// Identity and status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0.simple())
    }
}

impl From<Uuid> for RunId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    InProgress,
    Success,
    Failure,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in_progress"),
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Size of the workflow a run was started with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Workload {
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    pub duration_ms: i64,
    pub node_count: usize,
    pub edge_count: usize,
    pub step_count: usize,
}

impl RunMetrics {
    /// Duration for display; never negative.
    pub fn display_duration_ms(&self) -> u64 {
        self.duration_ms.max(0) as u64
    }
}

// ---------------------------------------------------------------------------
// RunRecord
// ---------------------------------------------------------------------------

/// How a run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The simulator answered; `success` in the result decides the status.
    Completed(SimulationResult),
    /// No result was obtained. Carries the user-facing message.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub id: RunId,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SimulationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<RunMetrics>,
}

impl RunRecord {
    pub fn in_progress(id: RunId, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: RunStatus::InProgress,
            started_at,
            finished_at: None,
            result: None,
            error: None,
            metrics: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status != RunStatus::InProgress
    }

    /// Move the record to its terminal state.
    ///
    /// `finished_at` is clamped to `started_at` so the record never reports
    /// finishing before it began.
    pub fn finish(&mut self, outcome: RunOutcome, finished_at: DateTime<Utc>, workload: Workload) {
        let finished_at = finished_at.max(self.started_at);
        let duration_ms = (finished_at - self.started_at).num_milliseconds();

        let step_count = match outcome {
            RunOutcome::Completed(result) => {
                self.status = if result.success { RunStatus::Success } else { RunStatus::Failure };
                let steps = result.steps.len();
                self.result = Some(result);
                steps
            }
            RunOutcome::Failed(message) => {
                self.status = RunStatus::Failure;
                self.error = Some(message);
                0
            }
        };

        self.finished_at = Some(finished_at);
        self.metrics = Some(RunMetrics {
            duration_ms,
            node_count: workload.node_count,
            edge_count: workload.edge_count,
            step_count,
        });
    }
}

// ---------------------------------------------------------------------------
// RunHistory
// ---------------------------------------------------------------------------

/// Bounded, insertion-ordered collection of runs. The oldest run is evicted
/// once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct RunHistory {
    capacity: usize,
    runs: VecDeque<RunRecord>,
}

impl Default for RunHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RunHistory {
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, runs: VecDeque::with_capacity(capacity) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Record a new in-progress run and return its id.
    pub fn begin(&mut self, started_at: DateTime<Utc>) -> RunId {
        let id = RunId::new();
        self.runs.push_back(RunRecord::in_progress(id, started_at));
        while self.runs.len() > self.capacity {
            self.runs.pop_front();
        }
        id
    }

    /// Finish run `id`. Returns the updated record, or `None` if the run is
    /// unknown (evicted or cleared) or already finished.
    pub fn finish(
        &mut self,
        id: RunId,
        outcome: RunOutcome,
        finished_at: DateTime<Utc>,
        workload: Workload,
    ) -> Option<RunRecord> {
        let record = self.runs.iter_mut().find(|r| r.id == id)?;
        if record.is_finished() {
            return None;
        }
        record.finish(outcome, finished_at, workload);
        Some(record.clone())
    }

    pub fn get(&self, id: RunId) -> Option<&RunRecord> {
        self.runs.iter().find(|r| r.id == id)
    }

    /// All runs, oldest first.
    pub fn list(&self) -> Vec<RunRecord> {
        self.runs.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }
}
