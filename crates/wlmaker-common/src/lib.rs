pub mod actions;
pub mod errors;
pub mod signal;
pub mod types;

pub use actions::Action;
pub use errors::{ConfigError, ProtocolError, ToolkitError, WlmakerError};
pub use signal::{Signal, Subscription};
pub use types::{
    ClientCredentials, ClientId, Edges, NodeId, OutputId, Point, Rect, SurfaceId, ViewId,
    WorkspaceId,
};

pub type Result<T> = std::result::Result<T, WlmakerError>;
