//! Error types for continuum construction.

/// Errors produced when building a [`Continuum`](crate::Continuum).
///
/// Construction is the only fallible operation; lookups and enumeration are
/// total functions over a successfully built ring.
#[derive(Debug, thiserror::Error)]
pub enum ContinuumError {
    /// The routing group was empty or its total weight was not positive.
    #[error("invalid routing group: {0}")]
    InvalidGroup(String),
}
