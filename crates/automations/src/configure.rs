//! Binding catalog actions to automated-step nodes.

use std::collections::BTreeMap;

use engine::AutomatedStepData;
use tracing::debug;

use crate::AutomationAction;

pub fn find_action<'a>(actions: &'a [AutomationAction], id: &str) -> Option<&'a AutomationAction> {
    actions.iter().find(|a| a.id == id)
}

/// Point `data` at `action`.
///
/// The parameter map is rebuilt to hold exactly the action's parameters.
/// Values already present under the same name are kept; new names start
/// empty. Parameters the action does not declare are dropped.
pub fn apply_action(data: &mut AutomatedStepData, action: &AutomationAction) {
    let previous = data.parameters.take().unwrap_or_default();
    let parameters: BTreeMap<String, String> = action
        .params
        .iter()
        .map(|name| (name.clone(), previous.get(name).cloned().unwrap_or_default()))
        .collect();

    debug!(action = %action.id, params = parameters.len(), "automation action applied");

    data.action_id = Some(action.id.clone());
    data.action_label = Some(action.label.clone());
    data.parameters = Some(parameters);
}

/// Parameters of `action` that `data` has no non-empty value for, in
/// catalog order.
pub fn missing_parameters<'a>(data: &AutomatedStepData, action: &'a AutomationAction) -> Vec<&'a str> {
    action
        .params
        .iter()
        .filter(|name| {
            data.parameters
                .as_ref()
                .and_then(|p| p.get(name.as_str()))
                .map_or(true, |value| value.trim().is_empty())
        })
        .map(String::as_str)
        .collect()
}
