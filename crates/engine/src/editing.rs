//! In-place graph editing on an owned [`WorkflowData`].
//!
//! These are the canvas operations (add, update, delete, connect) expressed
//! against plain vectors. Each one applies immediately; there is no
//! transaction or undo log.

use uuid::Uuid;

use crate::models::{NodeData, NodeType, Position, WorkflowData, WorkflowEdge, WorkflowNode};

/// Edge id the canvas assigns when two nodes are connected.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("xy-edge__{source}-{target}")
}

impl WorkflowData {
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Append a node. Callers are responsible for id uniqueness.
    pub fn add_node(&mut self, node: WorkflowNode) {
        self.nodes.push(node);
    }

    /// Place a new node of `node_type` with its default data and return its id.
    pub fn add_default_node(&mut self, node_type: NodeType, position: Position) -> String {
        let id = format!("{node_type}-{}", Uuid::new_v4().simple());
        self.nodes.push(WorkflowNode::new(
            id.clone(),
            position,
            NodeData::default_for(node_type),
        ));
        id
    }

    /// Mutate the data of node `id`. Returns `false` if no such node exists.
    pub fn update_node<F>(&mut self, id: &str, update: F) -> bool
    where
        F: FnOnce(&mut NodeData),
    {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                update(&mut node.data);
                true
            }
            None => false,
        }
    }

    /// Remove node `id` together with every edge that touches it.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| e.source != id && e.target != id);
        true
    }

    /// Append a raw edge. Duplicate (source, target) pairs are allowed here.
    pub fn add_edge(&mut self, edge: WorkflowEdge) {
        self.edges.push(edge);
    }

    /// Connect `source` to `target` the way the canvas does: a second
    /// connection between the same pair is ignored.
    ///
    /// Returns the new edge id, or `None` if the pair was already connected.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<String> {
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return None;
        }
        let id = edge_id(source, target);
        self.edges.push(WorkflowEdge::new(id.clone(), source, target));
        Some(id)
    }

    pub fn disconnect(&mut self, edge_id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        self.edges.len() != before
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn three_node_chain() -> (WorkflowData, Vec<String>) {
        let mut wf = WorkflowData::default();
        let ids: Vec<String> = [NodeType::Start, NodeType::Task, NodeType::End]
            .into_iter()
            .map(|t| wf.add_default_node(t, Position::default()))
            .collect();
        wf.connect(&ids[0], &ids[1]);
        wf.connect(&ids[1], &ids[2]);
        (wf, ids)
    }

    #[test]
    fn default_nodes_get_prefixed_unique_ids() {
        let (wf, ids) = three_node_chain();
        assert!(ids[0].starts_with("start-"));
        assert!(ids[1].starts_with("task-"));
        assert!(ids[2].starts_with("end-"));
        assert_eq!(wf.nodes.len(), 3);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn connect_ignores_repeated_pair_but_add_edge_does_not() {
        let (mut wf, ids) = three_node_chain();
        assert_eq!(wf.connect(&ids[0], &ids[1]), None);
        assert_eq!(wf.edges.len(), 2);

        wf.add_edge(WorkflowEdge::new("dup", ids[0].clone(), ids[1].clone()));
        assert_eq!(wf.edges.len(), 3);
    }

    #[test]
    fn connect_uses_canvas_edge_ids() {
        let mut wf = WorkflowData::default();
        assert_eq!(wf.connect("a", "b").as_deref(), Some("xy-edge__a-b"));
    }

    #[test]
    fn delete_node_cascades_to_edges() {
        let (mut wf, ids) = three_node_chain();
        assert!(wf.delete_node(&ids[1]));
        assert_eq!(wf.nodes.len(), 2);
        assert!(wf.edges.is_empty());
        assert!(!wf.delete_node("missing"));
    }

    #[test]
    fn update_node_edits_data_in_place() {
        let (mut wf, ids) = three_node_chain();
        let updated = wf.update_node(&ids[1], |data| {
            if let NodeKind::Task(task) = &mut data.kind {
                task.title = "Background check".into();
            }
            data.sync_label();
        });
        assert!(updated);
        assert_eq!(wf.node(&ids[1]).unwrap().label(), "Background check");
        assert!(!wf.update_node("missing", |_| {}));
    }

    #[test]
    fn disconnect_and_clear() {
        let (mut wf, ids) = three_node_chain();
        assert!(wf.disconnect(&edge_id(&ids[0], &ids[1])));
        assert!(!wf.disconnect("nope"));
        assert_eq!(wf.edges.len(), 1);

        wf.clear();
        assert!(wf.is_empty());
    }
}
