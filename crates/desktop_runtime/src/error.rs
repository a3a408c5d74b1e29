//! Error types for the desktop runtime.

use thiserror::Error;

use crate::model::WindowId;

/// Errors raised by [`crate::registry::WindowRegistry`] transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The target window id is not present in the registry.
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),
    /// A window with this id already exists.
    #[error("duplicate window id: {0}")]
    DuplicateWindow(WindowId),
}

/// Failure reported by an event-bus subscriber. Logged by the bus, never propagated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    /// Builds a handler error from any displayable message.
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

impl From<RegistryError> for HandlerError {
    fn from(err: RegistryError) -> Self {
        Self(err.to_string())
    }
}

/// Runtime-level errors surfaced by window creation and configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DesktopError {
    /// Window registry rejected a transition.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Desktop configuration could not be parsed.
    #[error("invalid desktop config: {0}")]
    Config(String),
}
