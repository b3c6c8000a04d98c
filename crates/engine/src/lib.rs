//! `engine` crate — workflow graph model, simulation engine, document
//! import/export and run history.

pub mod models;
pub mod editing;
pub mod error;
pub mod simulator;
pub mod document;
pub mod runs;
pub mod runner;

pub use models::{
    ApprovalData, AutomatedStepData, EndData, NodeData, NodeKind, NodeType, Position, StartData,
    TaskData, WorkflowData, WorkflowEdge, WorkflowNode,
};
pub use error::{DocumentError, RunError};
pub use simulator::{simulate, simulate_at, SimulationResult, SimulationStep, StepStatus};
pub use runs::{RunHistory, RunId, RunMetrics, RunRecord, RunStatus};
pub use runner::{LocalBackend, RunnerConfig, SimulationBackend, SimulationRunner};
