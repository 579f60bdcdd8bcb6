//! Service-locator routing layer built on the continuum.
//!
//! A [`RoutingTable`] keeps one immutable
//! [`Continuum`](gyre_continuum::Continuum) per named routing group and
//! resolves keys against it. Group changes never mutate a published ring:
//! `update` builds a fresh continuum and swaps it in wholesale, so concurrent
//! readers see either the old ring or the new one, never a partial state.

mod error;
mod table;

pub use error::LocatorError;
pub use table::RoutingTable;
