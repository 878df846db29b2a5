use super::Action;

impl Action {
    /// Human-readable label, as shown in menus.
    pub fn label(&self) -> &'static str {
        match self {
            Action::None => "None",
            Action::LockScreen => "Lock Screen",
            Action::InhibitLockBegin => "Inhibit Locking",
            Action::InhibitLockEnd => "Allow Locking",
            Action::Quit => "Quit",
            Action::WorkspacePrevious => "Previous Workspace",
            Action::WorkspaceNext => "Next Workspace",
            Action::WindowRaise => "Raise Window",
            Action::WindowLower => "Lower Window",
            Action::WindowToggleMaximized => "Maximize Window",
            Action::WindowToggleFullscreen => "Fullscreen Window",
            Action::WindowToggleShaded => "Shade Window",
            Action::WindowIconify => "Iconify Window",
            Action::WindowClose => "Close Window",
            Action::Launch(_) => "Launch",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }

    /// Actions the window manager cannot carry out itself. They are handed
    /// to the embedding compositor (locker, idle inhibitor, launcher).
    pub fn is_forwarded(&self) -> bool {
        matches!(
            self,
            Action::LockScreen
                | Action::InhibitLockBegin
                | Action::InhibitLockEnd
                | Action::Quit
                | Action::Launch(_)
        )
    }

    /// Actions offered in the default root menu.
    pub fn menu_actions() -> Vec<Action> {
        vec![
            Action::WorkspacePrevious,
            Action::WorkspaceNext,
            Action::WindowToggleMaximized,
            Action::WindowToggleFullscreen,
            Action::WindowToggleShaded,
            Action::WindowIconify,
            Action::WindowClose,
            Action::LockScreen,
            Action::Quit,
        ]
    }
}
