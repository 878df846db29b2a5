//! Carrying out actions bound to hot corners, menus, tiles and buttons.

use std::time::Duration;

use wlmaker_common::{Action, ViewId};

use super::{Server, ServerEvent};
use crate::view::View;

impl Server {
    /// Run `action`. Session and launcher actions are handed to the
    /// embedder as [`ServerEvent::ActionRequested`]; window actions apply
    /// to the activated view.
    pub fn execute_action(&mut self, action: &Action) {
        if action.is_forwarded() {
            tracing::info!(action = action.label(), "action requested");
            self.events.emit(&ServerEvent::ActionRequested(action.clone()));
            return;
        }
        match action {
            Action::None => {}
            Action::WorkspaceNext => {
                self.next_workspace();
            }
            Action::WorkspacePrevious => {
                self.previous_workspace();
            }
            _ => match self.activated_view() {
                Some(view) => self.execute_view_action(view, action),
                None => tracing::debug!(action = action.label(), "no activated view"),
            },
        }
    }

    pub(super) fn execute_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.execute_action(&action);
        }
    }

    /// Run a window action against `view`. Anything else is run as a
    /// global action.
    pub fn execute_view_action(&mut self, view: ViewId, action: &Action) {
        let result = match action {
            Action::WindowRaise => self.raise_view(view),
            Action::WindowLower => self.lower_view(view),
            Action::WindowToggleMaximized => {
                let maximized = self.views.get(&view).is_some_and(View::is_maximized);
                self.set_view_maximized(view, !maximized)
            }
            Action::WindowToggleFullscreen => {
                let fullscreen = self.views.get(&view).is_some_and(View::is_fullscreen);
                self.set_view_fullscreen(view, !fullscreen)
            }
            Action::WindowToggleShaded => {
                let shaded = self.views.get(&view).is_some_and(View::is_shaded);
                self.set_view_shaded(view, !shaded).map(|_| ())
            }
            Action::WindowIconify => self.iconify_view(view),
            Action::WindowClose => self.close_view(view),
            other => {
                self.execute_action(other);
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::warn!(%view, action = action.label(), error = %e, "window action failed");
        }
    }

    /// Advance the clock to `now` and run whatever the due timers trigger.
    pub fn advance_time(&mut self, now: Duration) {
        for id in self.timers.expire(now) {
            if let Some(action) = self.hot_corner.on_timer(id) {
                self.execute_action(&action);
            }
        }
    }

    /// Earliest pending timer deadline on the server clock.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}
