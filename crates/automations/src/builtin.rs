//! Actions shipped with the designer.

use async_trait::async_trait;

use crate::{AutomationAction, AutomationCatalog, CatalogError};

/// The fixed catalog available without any external service.
#[derive(Debug, Clone, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn actions() -> Vec<AutomationAction> {
        vec![
            AutomationAction::new("send_email", "Send Email", &["to", "subject", "body"]),
            AutomationAction::new("generate_doc", "Generate Document", &["template", "recipient"]),
            AutomationAction::new(
                "create_ticket",
                "Create Support Ticket",
                &["category", "priority", "assignee"],
            ),
            AutomationAction::new(
                "update_database",
                "Update Database Record",
                &["table", "recordId", "fields"],
            ),
            AutomationAction::new(
                "send_notification",
                "Send Push Notification",
                &["userId", "message", "priority"],
            ),
            AutomationAction::new(
                "schedule_meeting",
                "Schedule Meeting",
                &["attendees", "duration", "subject"],
            ),
        ]
    }
}

#[async_trait]
impl AutomationCatalog for BuiltinCatalog {
    async fn list_actions(&self) -> Result<Vec<AutomationAction>, CatalogError> {
        Ok(Self::actions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_six_actions_in_order() {
        let actions = BuiltinCatalog.list_actions().await.unwrap();
        let ids: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "send_email",
                "generate_doc",
                "create_ticket",
                "update_database",
                "send_notification",
                "schedule_meeting",
            ]
        );
        assert_eq!(actions[3].params, vec!["table", "recordId", "fields"]);
    }

    #[test]
    fn action_serializes_with_params_list() {
        let value = serde_json::to_value(&BuiltinCatalog::actions()[1]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "generate_doc",
                "label": "Generate Document",
                "params": ["template", "recipient"]
            })
        );
    }
}
