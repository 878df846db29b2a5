//! Core types and constructor of the Server.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wlmaker_common::{
    Action, NodeId, OutputId, Rect, Signal, Subscription, ViewId, WlmakerError, WorkspaceId,
};
use wlmaker_config::WlmakerConfig;

use crate::chrome::{Clip, Dock, RootMenu};
use crate::cursor::Cursor;
use crate::hot_corner::HotCorner;
use crate::lock::SessionLock;
use crate::output::{OutputEvent, OutputLayout};
use crate::scene::SceneGraph;
use crate::seat::Seat;
use crate::serial::Serials;
use crate::timer::TimerQueue;
use crate::view::View;
use crate::workspace::{Layer, Workspace};

/// Notifications for whoever embeds the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    ViewMapped(ViewId),
    ViewUnmapped(ViewId),
    ViewActivated(Option<ViewId>),
    WorkspaceChanged { index: usize, name: String },
    SessionLocked,
    SessionUnlocked,
    /// An action the embedder carries out: locking, launching, quitting.
    ActionRequested(Action),
}

/// Owns the scene, every view and workspace, and the pointer, hot corner
/// and session lock state machines.
pub struct Server {
    pub(super) config: WlmakerConfig,
    /// Every node the server draws, views and chrome included.
    pub(super) scene: Box<dyn SceneGraph>,
    /// Keyboard and pointer focus as seen by clients.
    pub(super) seat: Box<dyn Seat>,
    /// Hot corner dwell timers, driven by [`Server::advance_time`].
    pub(super) timers: TimerQueue,
    pub(super) outputs: OutputLayout,
    /// Layout changes queued by the `outputs` signal, applied after each
    /// add, remove or update.
    pub(super) output_events: Rc<RefCell<Vec<OutputEvent>>>,
    pub(super) _output_subscription: Subscription,
    /// Usable box per output: the output minus layer exclusive zones.
    pub(super) usable: HashMap<OutputId, Rect>,
    /// Configure serials for lock surfaces.
    pub(super) serials: Serials,
    /// All views, mapped or not.
    pub(super) views: HashMap<ViewId, View>,
    /// View root node to view.
    pub(super) owners: HashMap<NodeId, ViewId>,
    /// Next view id to hand out. Ids are never reused.
    pub(super) next_view: u32,
    /// In configured order; never empty.
    pub(super) workspaces: Vec<Workspace>,
    /// Index of the current workspace.
    pub(super) current: usize,
    /// Parent of the session lock container, above all workspaces.
    pub(super) lock_layer: NodeId,
    /// Parent of unmapped views. Never enabled.
    pub(super) detached: NodeId,
    /// Pointer position and the move/resize grab.
    pub(super) cursor: Cursor,
    /// Interactive that received the last button press, as (view, node).
    /// The matching release goes there.
    pub(super) button_grab: Option<(ViewId, NodeId)>,
    pub(super) hot_corner: HotCorner,
    /// Lock in progress or held. Gone after unlock or when its client
    /// vanished.
    pub(super) session_lock: Option<SessionLock>,
    /// Set when a lock was confirmed, cleared only by unlock.
    pub(super) lock_engaged: bool,
    /// Launcher tiles; `None` when the dock is disabled.
    pub(super) dock: Option<Dock>,
    /// Workspace switcher; present together with the dock.
    pub(super) clip: Option<Clip>,
    /// Root menu while the right button holds it open.
    pub(super) menu: Option<RootMenu>,
    pub(super) events: Signal<ServerEvent>,
}

impl Server {
    /// Build the scene skeleton, one workspace per configured name, and
    /// the dock and clip when enabled. The first workspace is current.
    pub fn new(
        config: WlmakerConfig,
        mut scene: Box<dyn SceneGraph>,
        seat: Box<dyn Seat>,
    ) -> Result<Self, WlmakerError> {
        let root = scene.root();
        let workspaces_root = scene.create_tree(root)?;
        let lock_layer = scene.create_tree(root)?;
        let detached = scene.create_tree(root)?;
        scene.set_enabled(detached, false);

        let mut workspaces = Vec::with_capacity(config.workspaces.names.len());
        for (index, name) in config.workspaces.names.iter().enumerate() {
            let id = WorkspaceId(index as u32);
            workspaces.push(Workspace::new(scene.as_mut(), workspaces_root, id, name, index)?);
        }
        if workspaces.is_empty() {
            workspaces.push(Workspace::new(scene.as_mut(), workspaces_root, WorkspaceId(0), "Main", 0)?);
        }
        workspaces[0].set_enabled(scene.as_mut(), true);

        let outputs = OutputLayout::new();
        let output_events = Rc::new(RefCell::new(Vec::new()));
        let queue = output_events.clone();
        let output_subscription = outputs
            .events()
            .connect(move |event: &OutputEvent| queue.borrow_mut().push(event.clone()));

        let hot_corner = HotCorner::new(&config.hot_corner);
        let mut server = Self {
            config,
            scene,
            seat,
            timers: TimerQueue::new(),
            outputs,
            output_events,
            _output_subscription: output_subscription,
            usable: HashMap::new(),
            serials: Serials::new(),
            views: HashMap::new(),
            owners: HashMap::new(),
            next_view: 1,
            workspaces,
            current: 0,
            lock_layer,
            detached,
            cursor: Cursor::new(),
            button_grab: None,
            hot_corner,
            session_lock: None,
            lock_engaged: false,
            dock: None,
            clip: None,
            menu: None,
            events: Signal::new(),
        };
        if server.config.dock.enabled {
            server.create_chrome()?;
        }
        tracing::info!(
            workspaces = server.workspaces.len(),
            dock = server.dock.is_some(),
            "server ready"
        );
        Ok(server)
    }

    fn create_chrome(&mut self) -> Result<(), WlmakerError> {
        let name = self.workspaces[self.current].name().to_owned();

        let id = self.allocate_view_id();
        let (view, clip) = Clip::create(self.scene.as_mut(), self.detached, id, &self.config.dock, &name)?;
        self.register_view(view);
        self.clip = Some(clip);
        self.map_view_at(id, Layer::Top)?;

        let id = self.allocate_view_id();
        let (view, dock) = Dock::create(self.scene.as_mut(), self.detached, id, &self.config.dock)?;
        self.register_view(view);
        self.dock = Some(dock);
        self.map_view_at(id, Layer::Top)?;
        Ok(())
    }

    pub(super) fn allocate_view_id(&mut self) -> ViewId {
        let id = ViewId(self.next_view);
        self.next_view += 1;
        id
    }

    pub(super) fn register_view(&mut self, view: View) {
        self.owners.insert(view.root(), view.id());
        self.views.insert(view.id(), view);
    }

    // -- Accessors --

    /// Notifications for the embedder.
    pub fn events(&self) -> &Signal<ServerEvent> {
        &self.events
    }

    pub fn config(&self) -> &WlmakerConfig {
        &self.config
    }

    pub fn scene(&self) -> &dyn SceneGraph {
        self.scene.as_ref()
    }

    pub fn seat(&self) -> &dyn Seat {
        self.seat.as_ref()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn hot_corner(&self) -> &HotCorner {
        &self.hot_corner
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn outputs(&self) -> &OutputLayout {
        &self.outputs
    }

    /// Any view, mapped or not.
    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn current_workspace(&self) -> &Workspace {
        &self.workspaces[self.current]
    }

    /// Index of the current workspace in configured order.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Activated view of the current workspace.
    pub fn activated_view(&self) -> Option<ViewId> {
        self.workspaces[self.current].activated()
    }

    pub fn lock_layer(&self) -> NodeId {
        self.lock_layer
    }

    /// True from lock confirmation until unlock, also after the locking
    /// client went away.
    pub fn is_locked(&self) -> bool {
        self.lock_engaged
    }

    /// Lock in progress or held by a live client.
    pub fn session_lock(&self) -> Option<&SessionLock> {
        self.session_lock.as_ref()
    }

    pub fn dock(&self) -> Option<&Dock> {
        self.dock.as_ref()
    }

    pub fn clip(&self) -> Option<&Clip> {
        self.clip.as_ref()
    }

    /// Root menu, while open.
    pub fn menu(&self) -> Option<&RootMenu> {
        self.menu.as_ref()
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("views", &self.views.len())
            .field("workspace", &self.current)
            .field("outputs", &self.outputs.len())
            .field("cursor", &self.cursor)
            .field("locked", &self.lock_engaged)
            .finish()
    }
}
