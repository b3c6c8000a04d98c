//! Workflow document import and export.
//!
//! A document is `WorkflowData` serialised as JSON. Exporting and importing
//! again reproduces the same nodes, edges, data and positions.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::{DocumentError, models::WorkflowData};

/// Serialise `workflow` as an indented JSON document.
pub fn export_json(workflow: &WorkflowData) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(workflow)?)
}

/// Parse a JSON document into a workflow.
///
/// # Errors
/// [`DocumentError::Parse`] if the text is not JSON, is missing `nodes` or
/// `edges`, or contains a node whose `type` disagrees with its data.
pub fn import_json(text: &str) -> Result<WorkflowData, DocumentError> {
    let workflow: WorkflowData = serde_json::from_str(text)?;
    debug!(
        nodes = workflow.nodes.len(),
        edges = workflow.edges.len(),
        "workflow document parsed"
    );
    Ok(workflow)
}

pub fn export_file(workflow: &WorkflowData, path: impl AsRef<Path>) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let text = export_json(workflow)?;
    fs::write(path, text).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("exported workflow to {}", path.display());
    Ok(())
}

pub fn import_file(path: impl AsRef<Path>) -> Result<WorkflowData, DocumentError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    import_json(&text)
}
