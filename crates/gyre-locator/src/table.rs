//! Routing table: named groups and their continuums.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use gyre_continuum::Continuum;
use gyre_types::RoutingGroup;
use tracing::info;

use crate::error::LocatorError;

/// Read-mostly map from group name to its published continuum.
///
/// Lookups take the read lock only long enough to clone an `Arc` to the
/// group's continuum; updates build the replacement continuum outside the
/// lock and swap it in under the write lock.
#[derive(Default)]
pub struct RoutingTable {
    groups: RwLock<HashMap<String, Arc<Continuum>>>,
}

impl RoutingTable {
    /// Create an empty routing table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the continuum for a named group.
    ///
    /// Refresh is construction: the previous continuum (if any) is discarded
    /// wholesale once the new one is in place. Fails when the group
    /// definition cannot produce a valid ring.
    pub fn update(
        &self,
        name: impl Into<String>,
        group: &RoutingGroup,
    ) -> Result<(), LocatorError> {
        let name = name.into();
        let continuum = Arc::new(Continuum::new(group)?);

        info!(
            group = %name,
            members = group.len(),
            points = continuum.len(),
            "routing group updated"
        );

        self.write_guard().insert(name, continuum);
        Ok(())
    }

    /// Drop a named group. Returns true if it was present.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.write_guard().remove(name).is_some();
        if removed {
            info!(group = %name, "routing group removed");
        }
        removed
    }

    /// Resolve a key against the named group's continuum.
    pub fn resolve(
        &self,
        name: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<String, LocatorError> {
        Ok(self.continuum(name)?.get(key).to_string())
    }

    /// Resolve a uniformly random draw against the named group's continuum.
    pub fn resolve_any(&self, name: &str) -> Result<String, LocatorError> {
        Ok(self.continuum(name)?.get_random().to_string())
    }

    /// Snapshot the named group's ring for cross-node verification.
    pub fn snapshot(&self, name: &str) -> Result<Vec<(u32, String)>, LocatorError> {
        Ok(self.continuum(name)?.all())
    }

    /// Names of all installed groups, sorted.
    pub fn groups(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_guard().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of installed groups.
    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    /// Return true if no groups are installed.
    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    fn continuum(&self, name: &str) -> Result<Arc<Continuum>, LocatorError> {
        self.read_guard()
            .get(name)
            .cloned()
            .ok_or_else(|| LocatorError::GroupNotFound(name.to_string()))
    }

    fn read_guard(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Continuum>>> {
        self.groups.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<Continuum>>> {
        self.groups.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingTable")
            .field("groups", &self.groups())
            .finish_non_exhaustive()
    }
}
