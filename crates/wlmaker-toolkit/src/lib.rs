//! Stacking window manager toolkit: scene-graph views, interactives,
//! workspaces, pointer handling, hot corners and the session lock.

pub mod chrome;
pub mod cursor;
pub mod hot_corner;
pub mod input;
pub mod interactive;
pub mod lock;
pub mod output;
pub mod scene;
pub mod seat;
pub mod serial;
pub mod server;
pub mod texture;
pub mod timer;
pub mod view;
pub mod workspace;

#[cfg(test)]
mod testing;

pub use cursor::{Cursor, CursorMode};
pub use hot_corner::HotCorner;
pub use lock::{LockClient, SessionLock};
pub use output::{Output, OutputLayout};
pub use scene::{MemoryScene, SceneGraph};
pub use seat::{HeadlessSeat, Seat};
pub use server::{Server, ServerEvent};
pub use timer::{TimerQueue, TimerService};
pub use view::{View, ViewKind};
pub use workspace::{Layer, Workspace};
