//! Error types for the locator crate.

use gyre_continuum::ContinuumError;

/// Errors produced by the routing table.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    /// The named routing group has not been installed.
    #[error("routing group not found: {0}")]
    GroupNotFound(String),

    /// Building the group's continuum failed.
    #[error(transparent)]
    Continuum(#[from] ContinuumError),
}
