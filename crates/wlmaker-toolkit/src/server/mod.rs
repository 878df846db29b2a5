//! The window manager core.
//!
//! [`Server`] ties the toolkit together: it owns the scene and all views,
//! routes pointer input through the cursor and hot corner, and applies
//! session lock requests. Each concern lives in its own `impl` block:
//!
//! - `views`: lifecycle, stacking, activation, window states, layer arrangement
//! - `pointer`: motion, buttons, axis and the root menu
//! - `actions`: carrying out [`Action`](wlmaker_common::Action)s and timers
//! - `lock`: session lock requests
//! - `outputs`: output hotplug
//! - `workspaces`: workspace switching

mod actions;
mod lock;
mod outputs;
mod pointer;
mod types;
mod views;
mod workspaces;


pub use types::{Server, ServerEvent};
