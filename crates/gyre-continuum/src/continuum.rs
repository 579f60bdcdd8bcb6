//! Continuum construction and lookup.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use gyre_types::RoutingGroup;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::digest;
use crate::error::ContinuumError;
use crate::ring::{Element, Ring};

/// Hash quads contributed by a member carrying the whole group weight.
///
/// With four points per quad this yields ~256 ring points per unit-weight
/// member in a unit-sized group. The multiplier fixes the ring contents, so
/// changing it would break compatibility with peer routers.
const QUADS_PER_UNIT: usize = 64;

/// A weighted consistent-hashing ring over the members of a routing group.
///
/// Built once from a frozen [`RoutingGroup`], then shared read-only across
/// any number of concurrent lookup callers. Keyed lookups are lock-free; the
/// keyless generator is the only mutable state and sits behind a mutex whose
/// critical section is a single 32-bit draw. Refreshing a group means
/// building a new continuum and discarding this one wholesale.
pub struct Continuum {
    ring: Ring,
    rng: Mutex<SmallRng>,
}

impl Continuum {
    /// Materialize the ring from a routing group.
    ///
    /// Each member receives `round((weight / total) · 64 · len)` digest
    /// steps; every step contributes the four points of one MD5 quad. A
    /// member whose share rounds to zero contributes no points, which is
    /// valid and does not error.
    ///
    /// Fails with [`ContinuumError::InvalidGroup`] when the group is empty
    /// or its total weight is not positive within double precision.
    pub fn new(group: &RoutingGroup) -> Result<Self, ContinuumError> {
        let length = group.len();
        let weight = group.total_weight();

        debug!(
            members = length,
            total_weight = weight,
            "populating continuum"
        );

        if length == 0 || weight < f64::EPSILON {
            return Err(ContinuumError::InvalidGroup(
                "the total weight of the routing group must be positive".to_string(),
            ));
        }

        let steps_budget = QUADS_PER_UNIT * length;
        let mut elements = Vec::new();

        for (name, member_weight) in group.iter() {
            let slice = member_weight / weight;
            let steps = (slice * steps_budget as f64).round() as usize;
            let name: Arc<str> = Arc::from(name);

            for step in 0..steps {
                let step_bytes = step.to_ne_bytes();
                for point in digest::quad(&[name.as_bytes(), &step_bytes]) {
                    elements.push(Element {
                        point,
                        name: Arc::clone(&name),
                    });
                }
            }

            debug!(
                steps,
                name = %name,
                percent = slice * 100.0,
                steps_budget,
                "added member quads"
            );
        }

        let ring = Ring::from_elements(elements);

        debug!(
            points = ring.len(),
            unique = ring.all_distinct(),
            "resulting continuum population"
        );

        Ok(Self {
            ring,
            rng: Mutex::new(SmallRng::from_os_rng()),
        })
    }

    /// Resolve a key to the name of the member owning it.
    ///
    /// The key is hashed to a single target point (MD5 quad, XOR-folded);
    /// the result is the member owning the smallest ring point strictly
    /// greater than the target, wrapping to the smallest point when the
    /// target is at or past the largest. Deterministic and total: the same
    /// key always resolves to the same member of a given continuum.
    pub fn get(&self, key: impl AsRef<[u8]>) -> &str {
        let key = key.as_ref();
        let target = digest::fold(digest::quad(&[key]));
        let element = self.owner_of(target);

        debug!(
            key = %String::from_utf8_lossy(key),
            target,
            point = element.point,
            name = %element.name,
            "resolved keyed lookup"
        );

        &element.name
    }

    /// Resolve a uniformly random point to the name of the member owning it.
    ///
    /// Each member is returned with frequency converging to its share of
    /// ring points, which approximates its weight share up to rounding.
    pub fn get_random(&self) -> &str {
        let target = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random::<u32>();
        let element = self.owner_of(target);

        debug!(
            key = "random",
            target,
            point = element.point,
            name = %element.name,
            "resolved keyless lookup"
        );

        &element.name
    }

    /// Snapshot every `(point, name)` element in ascending point order.
    ///
    /// The returned vector is an owned copy; the ring itself stays with the
    /// continuum. Intended for introspection and cross-node verification.
    pub fn all(&self) -> Vec<(u32, String)> {
        self.ring
            .iter()
            .map(|element| (element.point, element.name.to_string()))
            .collect()
    }

    /// Number of points on the ring.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Always false for a successfully built continuum: the heaviest member
    /// of a valid group receives at least `round(64) = 64` steps.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    fn owner_of(&self, target: u32) -> &Element {
        self.ring
            .locate(target)
            .expect("a constructed continuum is never empty")
    }
}

impl fmt::Debug for Continuum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuum")
            .field("points", &self.ring.len())
            .finish_non_exhaustive()
    }
}
