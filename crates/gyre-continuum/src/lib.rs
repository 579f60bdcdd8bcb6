//! Weighted consistent-hashing continuum for service routing.
//!
//! A [`Continuum`] maps opaque keys to the named members of a
//! [`RoutingGroup`](gyre_types::RoutingGroup). Each member contributes ring
//! points on the 32-bit hash space in proportion to its weight; a lookup
//! hashes the key and returns the member owning the smallest point strictly
//! greater than the hashed value, wrapping to the smallest point past the
//! largest.
//!
//! The ring layout is normative: points are carved from MD5 digests of
//! `name ++ step`, four 32-bit points per digest, so peer routers building
//! from an equal group definition hold bit-identical rings. The continuum is
//! immutable once built; a group change means building a new continuum.

mod continuum;
pub mod digest;
mod error;
mod ring;

pub use continuum::Continuum;
pub use error::ContinuumError;
