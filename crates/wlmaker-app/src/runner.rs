//! Headless runner: a [`Server`] on in-memory collaborators, driven by a
//! replay script and the toolkit's timers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::process::ExitStatus;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;

use wlmaker_common::{Action, OutputId, Subscription, SurfaceId, ViewId, WlmakerError};
use wlmaker_config::WlmakerConfig;
use wlmaker_toolkit::input::{AxisEvent, ButtonEvent};
use wlmaker_toolkit::view::{HeadlessToplevel, ToplevelRequest};
use wlmaker_toolkit::{HeadlessSeat, MemoryScene, Output, Server, ServerEvent};

use crate::cli::OutputSpec;
use crate::replay::{ReplayInput, ReplayStep};

/// A server plus the clients the replay script created.
pub struct Session {
    server: Server,
    events: Rc<RefCell<Vec<ServerEvent>>>,
    _subscription: Subscription,
    /// Toplevels by script surface number. Each answers configures with a
    /// matching commit, like a cooperative client.
    windows: HashMap<u32, (ViewId, HeadlessToplevel)>,
    quit: bool,
}

impl Session {
    /// Build the server and lay out one headless output per spec, left to
    /// right. No specs means a single 1920x1080 output.
    pub fn new(config: WlmakerConfig, outputs: &[OutputSpec]) -> Result<Self, WlmakerError> {
        let mut server = Server::new(
            config,
            Box::new(MemoryScene::new()),
            Box::new(HeadlessSeat::new()),
        )?;

        let defaults = [OutputSpec::default()];
        let specs = if outputs.is_empty() { &defaults[..] } else { outputs };
        for (index, spec) in specs.iter().enumerate() {
            let number = index as u32 + 1;
            let (x, y) = server.outputs().next_position();
            let output = Output::new(
                OutputId(number),
                format!("HEADLESS-{number}"),
                spec.width,
                spec.height,
            )
            .with_scale(spec.scale)
            .with_position(x, y);
            tracing::info!(
                name = %output.name,
                width = spec.width,
                height = spec.height,
                scale = spec.scale,
                "output added"
            );
            server.add_output(output)?;
        }

        let events = Rc::new(RefCell::new(Vec::new()));
        let log = events.clone();
        let subscription = server
            .events()
            .connect(move |event| log.borrow_mut().push(event.clone()));

        Ok(Self {
            server,
            events,
            _subscription: subscription,
            windows: HashMap::new(),
            quit: false,
        })
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Window view created for script surface `surface`.
    #[cfg(test)]
    pub fn window(&self, surface: u32) -> Option<ViewId> {
        self.windows.get(&surface).map(|(id, _)| *id)
    }

    /// Fire timers due at `now`.
    pub fn advance(&mut self, now: Duration) {
        self.server.advance_time(now);
        self.settle();
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.server.next_deadline()
    }

    /// Feed one scripted input at `now`. Errors are logged and skipped.
    pub fn apply(&mut self, now: Duration, input: &ReplayInput) {
        self.server.advance_time(now);
        let time_msec = now.as_millis() as u32;
        if let Err(e) = self.dispatch(time_msec, input) {
            tracing::warn!(error = %e, ?input, "replay step failed");
        }
        self.settle();
    }

    fn dispatch(&mut self, time_msec: u32, input: &ReplayInput) -> Result<(), WlmakerError> {
        match input {
            ReplayInput::Motion { x, y } => self.server.pointer_motion(time_msec, *x, *y),
            ReplayInput::Button { button, state } => self.server.pointer_button(&ButtonEvent {
                time_msec,
                button: *button,
                state: *state,
            }),
            ReplayInput::Axis { orientation, delta } => self.server.pointer_axis(&AxisEvent {
                time_msec,
                orientation: *orientation,
                delta: *delta,
            }),
            ReplayInput::Window {
                surface,
                width,
                height,
            } => {
                if self.windows.contains_key(surface) {
                    return Err(WlmakerError::Other(format!(
                        "surface {surface} already has a window"
                    )));
                }
                let handle = HeadlessToplevel::new(SurfaceId(*surface));
                let id = self
                    .server
                    .add_toplevel(Box::new(handle.clone()), (*width, *height), None)?;
                self.server.map_view(id)?;
                self.windows.insert(*surface, (id, handle));
            }
            ReplayInput::CloseWindow { surface } => {
                let (id, _) = self.windows.remove(surface).ok_or_else(|| {
                    WlmakerError::Other(format!("surface {surface} has no window"))
                })?;
                self.server.destroy_view(id)?;
            }
            ReplayInput::Action { action } => self.server.execute_action(action),
            ReplayInput::Workspace { index } => {
                self.server.switch_workspace(*index);
            }
        }
        Ok(())
    }

    /// Let the headless clients respond, then handle what the server
    /// asked of the embedder.
    fn settle(&mut self) {
        let mut closed = Vec::new();
        for (surface, (id, handle)) in &self.windows {
            let mut size = None;
            for request in handle.take_requests() {
                match request {
                    ToplevelRequest::Configure(w, h) => size = Some((w, h)),
                    ToplevelRequest::Close => closed.push(*surface),
                    _ => {}
                }
            }
            if let Some((w, h)) = size {
                if let Err(e) = self.server.toplevel_commit(*id, w, h) {
                    tracing::warn!(error = %e, %id, "headless commit failed");
                }
            }
        }
        for surface in closed {
            if let Some((id, _)) = self.windows.remove(&surface) {
                if let Err(e) = self.server.destroy_view(id) {
                    tracing::warn!(error = %e, %id, "headless close failed");
                }
            }
        }

        let events = std::mem::take(&mut *self.events.borrow_mut());
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::ActionRequested(Action::Quit) => {
                tracing::info!("quit requested");
                self.quit = true;
            }
            ServerEvent::ActionRequested(Action::Launch(command)) => {
                launch(&command);
            }
            ServerEvent::ActionRequested(Action::LockScreen) => {
                tracing::info!("lock requested; no locker runs headless");
            }
            ServerEvent::ActionRequested(action) => {
                tracing::debug!(?action, "action ignored headless");
            }
            other => tracing::debug!(event = ?other, "server event"),
        }
    }
}

/// Start `command` through `sh -c`. A task waits for the child so it is
/// reaped when it exits; its handle yields the exit status.
fn launch(command: &str) -> Option<JoinHandle<Option<ExitStatus>>> {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::warn!(%command, "launch outside the runtime ignored");
        return None;
    };
    let mut child = match tokio::process::Command::new("sh").arg("-c").arg(command).spawn() {
        Ok(child) => child,
        Err(e) => {
            tracing::warn!(%command, error = %e, "launch failed");
            return None;
        }
    };
    tracing::info!(%command, pid = ?child.id(), "launched");
    let command = command.to_owned();
    Some(runtime.spawn(async move {
        match child.wait().await {
            Ok(status) => {
                tracing::debug!(%command, %status, "launched command exited");
                Some(status)
            }
            Err(e) => {
                tracing::warn!(%command, error = %e, "waiting for launched command failed");
                None
            }
        }
    }))
}

/// Drive `session` until the script is done and no timer is pending, a
/// quit is requested, or Ctrl-C. Without a script it runs until quit or
/// Ctrl-C.
pub async fn run(
    mut session: Session,
    script: Option<Vec<ReplayStep>>,
) -> Result<(), WlmakerError> {
    let scripted = script.is_some();
    let mut steps = script.unwrap_or_default().into_iter().peekable();
    let start = tokio::time::Instant::now();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let now = start.elapsed();
        session.advance(now);
        while let Some(step) = steps.next_if(|s| Duration::from_millis(s.at_ms) <= now) {
            session.apply(now, &step.input);
        }
        if session.quit_requested() {
            break;
        }

        let next_step = steps.peek().map(|s| Duration::from_millis(s.at_ms));
        let wake = match (session.next_deadline(), next_step) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        match wake {
            Some(wake) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(start + wake) => {}
                    result = &mut ctrl_c => {
                        result?;
                        tracing::info!("interrupted");
                        break;
                    }
                }
            }
            None if scripted => {
                tracing::info!("replay finished");
                break;
            }
            None => {
                (&mut ctrl_c).await?;
                tracing::info!("interrupted");
                break;
            }
        }
    }

    tracing::info!(views = session.server().view_count(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wlmaker_toolkit::input::{ButtonState, BTN_LEFT};
    use wlmaker_toolkit::workspace::Layer;

    fn quiet_config() -> WlmakerConfig {
        let mut config = WlmakerConfig::default();
        config.dock.enabled = false;
        config
    }

    fn session() -> Session {
        Session::new(quiet_config(), &[]).unwrap()
    }

    #[test]
    fn default_output_when_none_given() {
        let session = session();
        let outputs: Vec<_> = session.server().outputs().iter().collect();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].name, "HEADLESS-1");
        assert_eq!(outputs[0].effective_size(), (1920, 1080));
    }

    #[test]
    fn outputs_laid_out_left_to_right() {
        let specs = [
            "1920x1080".parse::<OutputSpec>().unwrap(),
            "2560x1440@2".parse::<OutputSpec>().unwrap(),
        ];
        let session = Session::new(quiet_config(), &specs).unwrap();
        let second = session.server().outputs().get(OutputId(2)).unwrap();
        assert_eq!(second.layout_box().x, 1920);
        assert_eq!(second.effective_size(), (1280, 720));
        assert_eq!(session.server().outputs().extents().width, 3200);
    }

    #[test]
    fn scripted_window_is_mapped_and_activated() {
        let mut session = session();
        session.apply(
            Duration::ZERO,
            &ReplayInput::Window {
                surface: 1,
                width: 400,
                height: 300,
            },
        );
        let id = session.window(1).unwrap();
        assert_eq!(session.server().activated_view(), Some(id));
        assert_eq!(
            session.server().current_workspace().layer_of(id),
            Some(Layer::Shell)
        );
    }

    #[test]
    fn duplicate_surface_is_skipped() {
        let mut session = session();
        let window = ReplayInput::Window {
            surface: 1,
            width: 400,
            height: 300,
        };
        session.apply(Duration::ZERO, &window);
        session.apply(Duration::ZERO, &window);
        assert_eq!(session.server().view_count(), 1);
    }

    #[test]
    fn maximize_is_answered_with_a_commit() {
        let mut session = session();
        session.apply(
            Duration::ZERO,
            &ReplayInput::Window {
                surface: 1,
                width: 400,
                height: 300,
            },
        );
        session.apply(
            Duration::from_millis(10),
            &ReplayInput::Action {
                action: Action::WindowToggleMaximized,
            },
        );
        let id = session.window(1).unwrap();
        let view = session.server().view(id).unwrap();
        assert!(view.is_maximized());
        assert_eq!(view.size(), (1920, 1080 - 31));
    }

    #[test]
    fn close_button_destroys_the_window() {
        let mut session = session();
        session.apply(
            Duration::ZERO,
            &ReplayInput::Window {
                surface: 1,
                width: 400,
                height: 300,
            },
        );
        session.apply(
            Duration::ZERO,
            &ReplayInput::Action {
                action: Action::WindowClose,
            },
        );
        assert_eq!(session.window(1), None);
        assert_eq!(session.server().view_count(), 0);
    }

    #[test]
    fn close_window_step_forgets_the_surface() {
        let mut session = session();
        session.apply(
            Duration::ZERO,
            &ReplayInput::Window {
                surface: 7,
                width: 200,
                height: 100,
            },
        );
        session.apply(Duration::ZERO, &ReplayInput::CloseWindow { surface: 7 });
        assert_eq!(session.server().view_count(), 0);
        assert_eq!(session.server().activated_view(), None);
    }

    #[test]
    fn quit_action_stops_the_session() {
        let mut session = session();
        assert!(!session.quit_requested());
        session.apply(
            Duration::ZERO,
            &ReplayInput::Action {
                action: Action::Quit,
            },
        );
        assert!(session.quit_requested());
    }

    #[test]
    fn workspace_step_switches() {
        let mut session = session();
        session.apply(Duration::ZERO, &ReplayInput::Workspace { index: 1 });
        assert_eq!(session.server().current_index(), 1);
    }

    #[test]
    fn pointer_steps_reach_the_server() {
        let mut session = session();
        session.apply(Duration::ZERO, &ReplayInput::Motion { x: 500.0, y: 400.0 });
        session.apply(
            Duration::ZERO,
            &ReplayInput::Button {
                button: BTN_LEFT,
                state: ButtonState::Pressed,
            },
        );
        let position = session.server().cursor().position();
        assert_eq!((position.x, position.y), (500.0, 400.0));
    }

    #[test]
    fn hot_corner_timer_fires_on_advance() {
        let mut session = session();
        session.apply(Duration::ZERO, &ReplayInput::Motion { x: 500.0, y: 500.0 });
        session.apply(Duration::ZERO, &ReplayInput::Motion { x: 0.0, y: 0.0 });
        let deadline = session.next_deadline().unwrap();
        session.advance(deadline);
        assert_eq!(session.next_deadline(), None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn launched_command_is_reaped() {
        let waiter = launch("exit 3").unwrap();
        let status = waiter.await.unwrap().unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn launch_needs_the_runtime() {
        assert!(launch("true").is_none());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn replay_runs_to_completion() {
        let session = session();
        let script = crate::replay::parse_script(
            r#"{"kind": "window", "surface": 1, "width": 300, "height": 200}
{"at_ms": 50, "kind": "motion", "x": 10, "y": 10}
{"at_ms": 100, "kind": "workspace", "index": 1}"#,
        )
        .unwrap();
        run(session, Some(script)).await.unwrap();
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn quit_ends_the_run_early() {
        let session = session();
        let script = crate::replay::parse_script(
            r#"{"at_ms": 10, "kind": "action", "action": "quit"}
{"at_ms": 60000, "kind": "workspace", "index": 1}"#,
        )
        .unwrap();
        run(session, Some(script)).await.unwrap();
    }
}
