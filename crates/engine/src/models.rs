//! Core domain models for the workflow designer.
//!
//! These types are the source of truth for what a workflow looks like in
//! memory and on disk. The JSON shape matches the designer's canvas document:
//! camelCase field names, a node-level `type`, and a `data` object tagged by
//! its own `type`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NodeType
// ---------------------------------------------------------------------------

/// The closed set of node types a workflow can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    Task,
    Approval,
    Automated,
    End,
}

impl NodeType {
    pub const ALL: [NodeType; 5] = [
        NodeType::Start,
        NodeType::Task,
        NodeType::Approval,
        NodeType::Automated,
        NodeType::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Task => "task",
            Self::Approval => "approval",
            Self::Automated => "automated",
            Self::End => "end",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start"     => Ok(Self::Start),
            "task"      => Ok(Self::Task),
            "approval"  => Ok(Self::Approval),
            "automated" => Ok(Self::Automated),
            "end"       => Ok(Self::End),
            other       => Err(format!("unknown node type: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Canvas coordinate. Carried through import/export, never validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Per-type node data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalData {
    pub title: String,
    /// Required by the configuration form; the simulator never checks it.
    #[serde(default)]
    pub approver_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approve_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomatedStepData {
    pub title: String,
    /// Reference into the automation catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndData {
    pub end_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_summary: Option<bool>,
}

/// Type-specific node payload, discriminated by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Start(StartData),
    Task(TaskData),
    Approval(ApprovalData),
    Automated(AutomatedStepData),
    End(EndData),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Start(_) => NodeType::Start,
            Self::Task(_) => NodeType::Task,
            Self::Approval(_) => NodeType::Approval,
            Self::Automated(_) => NodeType::Automated,
            Self::End(_) => NodeType::End,
        }
    }
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Everything a node carries besides identity and position.
///
/// `label` is the generic display string used by the canvas and by
/// simulation messages. The type-specific title lives in [`NodeKind`]; the
/// configuration forms copy it into `label` on save (see [`NodeData::sync_label`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl NodeData {
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self { label: label.into(), kind }
    }

    /// The data a freshly placed node of `node_type` starts with.
    pub fn default_for(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Start => Self::new(
                "Start",
                NodeKind::Start(StartData {
                    title: "Start".into(),
                    metadata: Some(BTreeMap::new()),
                }),
            ),
            NodeType::Task => Self::new(
                "Task",
                NodeKind::Task(TaskData {
                    title: "New Task".into(),
                    description: Some(String::new()),
                    assignee: Some(String::new()),
                    due_date: Some(String::new()),
                    custom_fields: Some(BTreeMap::new()),
                }),
            ),
            NodeType::Approval => Self::new(
                "Approval",
                NodeKind::Approval(ApprovalData {
                    title: "Approval Required".into(),
                    approver_role: String::new(),
                    auto_approve_threshold: None,
                }),
            ),
            NodeType::Automated => Self::new(
                "Automated",
                NodeKind::Automated(AutomatedStepData {
                    title: "Automated Action".into(),
                    action_id: Some(String::new()),
                    action_label: Some(String::new()),
                    parameters: Some(BTreeMap::new()),
                }),
            ),
            NodeType::End => Self::new(
                "End",
                NodeKind::End(EndData {
                    end_message: "Workflow Complete".into(),
                    show_summary: Some(false),
                }),
            ),
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// The type-specific title (`endMessage` for End nodes).
    pub fn title(&self) -> &str {
        match &self.kind {
            NodeKind::Start(d) => &d.title,
            NodeKind::Task(d) => &d.title,
            NodeKind::Approval(d) => &d.title,
            NodeKind::Automated(d) => &d.title,
            NodeKind::End(d) => &d.end_message,
        }
    }

    /// Copy the type-specific title into the generic label.
    pub fn sync_label(&mut self) {
        self.label = self.title().to_owned();
    }
}

// ---------------------------------------------------------------------------
// WorkflowNode
// ---------------------------------------------------------------------------

/// A single node on the canvas.
///
/// The node-level `type` is derived from `data`, so the two can never
/// disagree in memory. Deserialization rejects documents where they do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct WorkflowNode {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, position: Position, data: NodeData) -> Self {
        Self { id: id.into(), position, data }
    }

    pub fn node_type(&self) -> NodeType {
        self.data.node_type()
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }
}

/// Wire shape of a node, with the redundant node-level `type`.
#[derive(Serialize, Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    node_type: NodeType,
    #[serde(default)]
    position: Position,
    data: NodeData,
}

impl TryFrom<RawNode> for WorkflowNode {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let data_type = raw.data.node_type();
        if raw.node_type != data_type {
            return Err(format!(
                "node '{}' declares type '{}' but carries '{}' data",
                raw.id, raw.node_type, data_type
            ));
        }
        Ok(Self { id: raw.id, position: raw.position, data: raw.data })
    }
}

impl From<WorkflowNode> for RawNode {
    fn from(node: WorkflowNode) -> Self {
        Self {
            node_type: node.node_type(),
            id: node.id,
            position: node.position,
            data: node.data,
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowEdge
// ---------------------------------------------------------------------------

/// Directed edge from one node to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl WorkflowEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { id: id.into(), source: source.into(), target: target.into() }
    }
}

// ---------------------------------------------------------------------------
// WorkflowData
// ---------------------------------------------------------------------------

/// A complete workflow: ordered nodes and ordered edges.
///
/// Node order is significant: the simulator emits steps in this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowData {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
}

impl WorkflowData {
    pub fn new(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> Self {
        Self { nodes, edges }
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_serializes_with_type_at_both_levels() {
        let node = WorkflowNode::new(
            "task-1",
            Position::new(10.0, 20.5),
            NodeData::new(
                "Collect documents",
                NodeKind::Task(TaskData {
                    title: "Collect documents".into(),
                    assignee: Some("hr@corp".into()),
                    due_date: Some("2024-05-01".into()),
                    ..Default::default()
                }),
            ),
        );

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "task-1",
                "type": "task",
                "position": { "x": 10.0, "y": 20.5 },
                "data": {
                    "label": "Collect documents",
                    "type": "task",
                    "title": "Collect documents",
                    "assignee": "hr@corp",
                    "dueDate": "2024-05-01"
                }
            })
        );
    }

    #[test]
    fn node_deserializes_from_canvas_document() {
        let node: WorkflowNode = serde_json::from_value(json!({
            "id": "approval-7",
            "type": "approval",
            "position": { "x": 0, "y": 5 },
            "data": {
                "label": "Manager sign-off",
                "type": "approval",
                "title": "Manager sign-off",
                "approverRole": "Manager",
                "autoApproveThreshold": 3
            }
        }))
        .unwrap();

        assert_eq!(node.node_type(), NodeType::Approval);
        assert_eq!(node.label(), "Manager sign-off");
        match &node.data.kind {
            NodeKind::Approval(d) => {
                assert_eq!(d.approver_role, "Manager");
                assert_eq!(d.auto_approve_threshold, Some(3.0));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn mismatched_node_and_data_type_is_rejected() {
        let result: Result<WorkflowNode, _> = serde_json::from_value(json!({
            "id": "n1",
            "type": "task",
            "position": { "x": 0, "y": 0 },
            "data": { "label": "Start", "type": "start", "title": "Start" }
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("declares type 'task' but carries 'start' data"), "{err}");
    }

    #[test]
    fn unknown_node_type_is_rejected() {
        let result: Result<WorkflowNode, _> = serde_json::from_value(json!({
            "id": "n1",
            "type": "webhook",
            "position": { "x": 0, "y": 0 },
            "data": { "label": "Hook", "type": "webhook" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn defaults_match_canvas_placement() {
        let end = NodeData::default_for(NodeType::End);
        assert_eq!(end.label, "End");
        assert_eq!(end.title(), "Workflow Complete");

        let task = NodeData::default_for(NodeType::Task);
        assert_eq!(task.label, "Task");
        assert_eq!(task.title(), "New Task");

        for node_type in NodeType::ALL {
            assert_eq!(NodeData::default_for(node_type).node_type(), node_type);
        }
    }

    #[test]
    fn sync_label_copies_type_specific_title() {
        let mut data = NodeData::default_for(NodeType::Automated);
        if let NodeKind::Automated(d) = &mut data.kind {
            d.title = "Email the candidate".into();
        }
        assert_eq!(data.label, "Automated");
        data.sync_label();
        assert_eq!(data.label, "Email the candidate");
    }

    #[test]
    fn node_type_parses_and_displays() {
        for node_type in NodeType::ALL {
            assert_eq!(node_type.to_string().parse::<NodeType>().unwrap(), node_type);
        }
        assert!("webhook".parse::<NodeType>().is_err());
    }
}
