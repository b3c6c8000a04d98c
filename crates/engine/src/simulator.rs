//! Workflow simulation — structural validation followed by a synthetic trace.
//!
//! Rules enforced (all of them, every time; errors are aggregated):
//! 1. Exactly one Start node.
//! 2. At least one End node.
//! 3. In a workflow with more than one node, every node touches an edge.
//!
//! When every rule passes, each node yields one `completed` step, in the
//! order the nodes are stored. Edges are not followed to order the trace.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{NodeType, WorkflowData, WorkflowNode};

pub const MISSING_START: &str = "Workflow must have at least one Start Node";
pub const MULTIPLE_START: &str = "Workflow can only have one Start Node";
pub const MISSING_END: &str = "Workflow must have at least one End Node";

/// Synthetic spacing between consecutive step timestamps.
pub const STEP_INTERVAL_MS: i64 = 1000;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
}

/// One entry of the execution trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStep {
    pub node_id: String,
    pub node_title: String,
    pub status: StepStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a simulation. `steps` and `errors` are never both non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub success: bool,
    pub steps: Vec<SimulationStep>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl SimulationResult {
    fn failed(errors: Vec<String>) -> Self {
        Self { success: false, steps: Vec::new(), errors }
    }

    fn succeeded(steps: Vec<SimulationStep>) -> Self {
        Self { success: true, steps, errors: Vec::new() }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Simulate `workflow`, stamping steps relative to the current time.
pub fn simulate(workflow: &WorkflowData) -> SimulationResult {
    simulate_at(workflow, Utc::now())
}

/// Simulate `workflow` as if the run began at `started_at`.
pub fn simulate_at(workflow: &WorkflowData, started_at: DateTime<Utc>) -> SimulationResult {
    let errors = validate(workflow);
    if !errors.is_empty() {
        return SimulationResult::failed(errors);
    }

    let steps = workflow
        .nodes
        .iter()
        .zip(0i64..)
        .map(|(node, index)| SimulationStep {
            node_id: node.id.clone(),
            node_title: node.label().to_owned(),
            status: StepStatus::Completed,
            message: step_message(node.node_type(), node.label()),
            timestamp: step_timestamp(started_at, index),
        })
        .collect();

    SimulationResult::succeeded(steps)
}

/// Run every structural rule and return all failures, in rule order.
pub fn validate(workflow: &WorkflowData) -> Vec<String> {
    let mut errors = Vec::new();
    let nodes = &workflow.nodes;

    let start_count = count_of(nodes, NodeType::Start);
    if start_count == 0 {
        errors.push(MISSING_START.to_owned());
    }
    if start_count > 1 {
        errors.push(MULTIPLE_START.to_owned());
    }

    if count_of(nodes, NodeType::End) == 0 {
        errors.push(MISSING_END.to_owned());
    }

    let disconnected = disconnected_nodes(workflow);
    if !disconnected.is_empty() {
        let labels: Vec<&str> = disconnected.iter().map(|n| n.label()).collect();
        errors.push(format!("Disconnected nodes found: {}", labels.join(", ")));
    }

    errors
}

/// Nodes that appear in no edge, in node order. A lone node is never
/// reported.
pub fn disconnected_nodes(workflow: &WorkflowData) -> Vec<&WorkflowNode> {
    if workflow.nodes.len() <= 1 {
        return Vec::new();
    }

    let connected: HashSet<&str> = workflow
        .edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .collect();

    workflow
        .nodes
        .iter()
        .filter(|n| !connected.contains(n.id.as_str()))
        .collect()
}

/// Trace message for a node of `node_type` labelled `label`.
pub fn step_message(node_type: NodeType, label: &str) -> String {
    match node_type {
        NodeType::Start => format!("Workflow started: {label}"),
        NodeType::Task => format!("Task assigned: {label}"),
        NodeType::Approval => format!("Approval requested: {label}"),
        NodeType::Automated => format!("Automated action executed: {label}"),
        NodeType::End => format!("Workflow completed: {label}"),
    }
}

/// `started_at` plus `index` step intervals, saturating at the latest
/// representable instant.
fn step_timestamp(started_at: DateTime<Utc>, index: i64) -> DateTime<Utc> {
    started_at
        .checked_add_signed(Duration::milliseconds(index * STEP_INTERVAL_MS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn count_of(nodes: &[WorkflowNode], node_type: NodeType) -> usize {
    nodes.iter().filter(|n| n.node_type() == node_type).count()
}
