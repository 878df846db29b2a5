use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identity of a scene-graph node.
    NodeId,
    "node"
);
define_id!(
    /// Handle of a view in the server's view registry.
    ViewId,
    "view"
);
define_id!(OutputId, "output");
define_id!(WorkspaceId, "workspace");
define_id!(
    /// A client surface, as known to the protocol layer.
    SurfaceId,
    "surface"
);
define_id!(ClientId, "client");

/// Credentials of the client that created a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub pid: i32,
    pub uid: u32,
    pub gid: u32,
}
