use std::path::PathBuf;

use crate::types::{OutputId, SurfaceId, ViewId, WorkspaceId};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Violations of a protocol contract by a client. These are reported back
/// to the originating connection and never bring down the compositor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("lock surface {0} was created without an output")]
    LockSurfaceWithoutOutput(SurfaceId),

    #[error("lock surface {surface} references unknown output {output}")]
    UnknownOutput { surface: SurfaceId, output: OutputId },

    #[error("output {0} already has a lock surface")]
    DuplicateLockSurface(OutputId),

    #[error("unlock requested before the session was locked")]
    UnlockBeforeLocked,

    #[error("lock surface {0} is not known to this lock")]
    UnknownLockSurface(SurfaceId),

    #[error("the session is already locked")]
    AlreadyLocked,

    #[error("lock surface {surface} acked serial {serial}, which was never sent")]
    InvalidSerial { surface: SurfaceId, serial: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    #[error("failed to create {what}: {reason}")]
    Creation { what: &'static str, reason: String },

    #[error("unknown view: {0}")]
    UnknownView(ViewId),

    #[error("unknown workspace: {0}")]
    UnknownWorkspace(WorkspaceId),

    #[error("unknown output: {0}")]
    UnknownOutput(OutputId),
}

#[derive(Debug, thiserror::Error)]
pub enum WlmakerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Toolkit(#[from] ToolkitError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
