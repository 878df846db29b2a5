use serde::{Deserialize, Serialize};

mod dispatch;

/// Every action that can be bound to a hot corner, a menu item, a dock tile
/// or a decoration button.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    None,

    // -- Session --
    LockScreen,
    InhibitLockBegin,
    InhibitLockEnd,
    Quit,

    // -- Workspaces --
    WorkspacePrevious,
    WorkspaceNext,

    // -- Activated window --
    WindowRaise,
    WindowLower,
    WindowToggleMaximized,
    WindowToggleFullscreen,
    WindowToggleShaded,
    WindowIconify,
    WindowClose,

    // -- Launcher --
    Launch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_actions_have_labels() {
        for action in Action::menu_actions() {
            assert!(!action.label().is_empty(), "action {:?} has empty label", action);
        }
    }

    #[test]
    fn forwarded_actions() {
        assert!(Action::LockScreen.is_forwarded());
        assert!(Action::InhibitLockBegin.is_forwarded());
        assert!(Action::Launch("foot".into()).is_forwarded());
        assert!(Action::Quit.is_forwarded());
        assert!(!Action::WorkspaceNext.is_forwarded());
        assert!(!Action::WindowClose.is_forwarded());
        assert!(!Action::None.is_forwarded());
    }

    #[test]
    fn action_serde_names() {
        let json = serde_json::to_string(&Action::WindowToggleMaximized).unwrap();
        assert_eq!(json, "\"window_toggle_maximized\"");

        let parsed: Action = serde_json::from_str("\"inhibit_lock_begin\"").unwrap();
        assert_eq!(parsed, Action::InhibitLockBegin);

        let launch: Action = serde_json::from_str(r#"{"launch":"foot"}"#).unwrap();
        assert_eq!(launch, Action::Launch("foot".into()));
    }

    #[test]
    fn default_is_none() {
        assert_eq!(Action::default(), Action::None);
        assert!(Action::None.is_none());
        assert!(!Action::Quit.is_none());
    }
}
