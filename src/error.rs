//! Errors recorded in a context.

use crate::iface::AttachError;
use crate::load::LoadError;

/// Error recorded in the error slot of a [`Context`][`crate::Context`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Copying a tree into the context failed.
    #[error("load failed: {0}")]
    Load(#[from] LoadError),
    /// Attaching a node failed.
    #[error(transparent)]
    Attach(#[from] AttachError),
    /// Error reported by a store or by the caller.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a custom error from the message.
    #[inline]
    #[must_use]
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}
