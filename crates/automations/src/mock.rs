//! `MockCatalog` — a test double for `AutomationCatalog`.
//!
//! Useful where the builtin list is irrelevant or a catalog outage needs to
//! be simulated.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{AutomationAction, AutomationCatalog, CatalogError};

/// Behaviour injected into `MockCatalog` at construction time.
pub enum MockBehaviour {
    /// Return these actions.
    Return(Vec<AutomationAction>),
    /// Fail with `CatalogError::Unavailable`.
    Fail(String),
}

/// A catalog that counts requests and answers with a fixed behaviour.
pub struct MockCatalog {
    pub behaviour: MockBehaviour,
    calls: AtomicUsize,
}

impl MockCatalog {
    pub fn returning(actions: Vec<AutomationAction>) -> Self {
        Self { behaviour: MockBehaviour::Return(actions), calls: AtomicUsize::new(0) }
    }

    pub fn failing(msg: impl Into<String>) -> Self {
        Self { behaviour: MockBehaviour::Fail(msg.into()), calls: AtomicUsize::new(0) }
    }

    /// Number of times `list_actions` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AutomationCatalog for MockCatalog {
    async fn list_actions(&self) -> Result<Vec<AutomationAction>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            MockBehaviour::Return(actions) => Ok(actions.clone()),
            MockBehaviour::Fail(msg) => Err(CatalogError::Unavailable(msg.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failing_catalog_reports_unavailable_and_counts_calls() {
        let catalog = MockCatalog::failing("timeout");
        let err = catalog.list_actions().await.unwrap_err();
        assert_eq!(err.to_string(), "automation catalog unavailable: timeout");
        assert_eq!(catalog.call_count(), 1);
    }

    #[tokio::test]
    async fn returning_catalog_echoes_actions() {
        let catalog = MockCatalog::returning(vec![AutomationAction::new("ping", "Ping", &[])]);
        assert_eq!(catalog.list_actions().await.unwrap().len(), 1);
        catalog.list_actions().await.unwrap();
        assert_eq!(catalog.call_count(), 2);
    }
}
