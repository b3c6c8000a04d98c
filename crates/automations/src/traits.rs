//! The `AutomationCatalog` trait and the action definitions it serves.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// One action an automated-step node can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationAction {
    pub id: String,
    pub label: String,
    /// Parameter names, in the order a form should ask for them.
    pub params: Vec<String>,
}

impl AutomationAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>, params: &[&str]) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Source of automation actions.
///
/// Takes no parameters and returns the full ordered list.
#[async_trait]
pub trait AutomationCatalog: Send + Sync {
    async fn list_actions(&self) -> Result<Vec<AutomationAction>, CatalogError>;
}
