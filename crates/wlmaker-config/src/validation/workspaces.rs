//! Workspace list validation.

use std::collections::HashSet;

use crate::schema::WlmakerConfig;

pub(crate) fn validate_workspaces(errors: &mut Vec<String>, config: &WlmakerConfig) {
    let names = &config.workspaces.names;
    if names.is_empty() || names.len() > 16 {
        errors.push(format!(
            "workspaces.names has {} entries, expected 1-16",
            names.len()
        ));
    }

    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            errors.push("workspaces.names contains an empty name".to_string());
        } else if !seen.insert(name.as_str()) {
            errors.push(format!("workspaces.names contains '{name}' twice"));
        }
    }
}
