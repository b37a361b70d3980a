//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! A kernel pass needs `&AgentStore` (shared read access to the settled
//! buffers, for neighbour queries) and `&mut [AgentRng]` (exclusive access
//! to each agent's RNG) at the same time.  Keeping the RNGs in a separate
//! `AgentRngs` struct lets both borrows coexist:
//!
//! ```ignore
//! // shoal-kernel pass (simplified):
//! output[range.clone()]
//!     .par_iter_mut()
//!     .zip(rngs.range_mut(range))
//!     .for_each(|(v, rng)| *v = kernel.steer(.., &store, rng));
//! ```

use std::ops::Range;

use shoal_core::{AgentId, AgentRng, KindId, SchoolId, Vec2};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] so a pass
/// can hold `&AgentStore` and `&mut AgentRngs` together.
#[derive(Debug)]
pub struct AgentRngs {
    inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    /// The RNGs of agents `range`, in index order.
    #[inline]
    pub fn range_mut(&mut self, range: Range<usize>) -> &mut [AgentRng] {
        &mut self.inner[range]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every buffer has exactly `count` elements and the `AgentId` value is the
/// index into all of them.  The count is fixed at build time.
///
/// `position` and `velocity` change once per tick, through
/// [`AgentStore::commit`]; the remaining buffers never change.
#[derive(Clone, Debug)]
pub struct AgentStore {
    count: usize,

    // ── Kinematic state ───────────────────────────────────────────────────
    position: Vec<Vec2>,
    velocity: Vec<Vec2>,

    // ── Static attributes ─────────────────────────────────────────────────
    kind: Vec<KindId>,
    schooling: Vec<bool>,
    school: Vec<SchoolId>,
    max_speed: Vec<f32>,

    /// `kind_ranges[k]` is the index range holding every agent of kind `k`.
    /// Empty for kinds with no agents.
    kind_ranges: Vec<Range<usize>>,
}

impl AgentStore {
    /// Number of agents.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    // ── Per-agent reads ───────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, agent: AgentId) -> Vec2 {
        self.position[agent.index()]
    }

    #[inline]
    pub fn velocity(&self, agent: AgentId) -> Vec2 {
        self.velocity[agent.index()]
    }

    #[inline]
    pub fn kind(&self, agent: AgentId) -> KindId {
        self.kind[agent.index()]
    }

    #[inline]
    pub fn is_schooling(&self, agent: AgentId) -> bool {
        self.schooling[agent.index()]
    }

    #[inline]
    pub fn school(&self, agent: AgentId) -> SchoolId {
        self.school[agent.index()]
    }

    #[inline]
    pub fn max_speed(&self, agent: AgentId) -> f32 {
        self.max_speed[agent.index()]
    }

    /// Heading in radians, `atan2(vy, vx)`.
    #[inline]
    pub fn heading(&self, agent: AgentId) -> f32 {
        let v = self.velocity[agent.index()];
        v.y.atan2(v.x)
    }

    // ── Slice views ───────────────────────────────────────────────────────

    pub fn positions(&self) -> &[Vec2] {
        &self.position
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocity
    }

    pub fn kinds(&self) -> &[KindId] {
        &self.kind
    }

    pub fn schooling(&self) -> &[bool] {
        &self.schooling
    }

    pub fn schools(&self) -> &[SchoolId] {
        &self.school
    }

    // ── Kind ranges ───────────────────────────────────────────────────────

    /// Number of kinds the store was built for (including kinds with no agents).
    #[inline]
    pub fn kind_count(&self) -> usize {
        self.kind_ranges.len()
    }

    /// Index range of every agent of `kind`.
    ///
    /// # Panics
    /// Panics if `kind` is not below [`kind_count`](Self::kind_count).
    #[inline]
    pub fn kind_range(&self, kind: KindId) -> Range<usize> {
        self.kind_ranges[kind.index()].clone()
    }

    /// `true` if the agents of `kind` school.  `false` for kinds with no agents.
    pub fn kind_is_schooling(&self, kind: KindId) -> bool {
        let range = self.kind_range(kind);
        !range.is_empty() && self.schooling[range.start]
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Swap in the fully computed position and velocity buffers of a tick.
    ///
    /// After the call `positions`/`velocities` hold the previous tick's
    /// values and can be reused as scratch space.
    ///
    /// # Panics
    /// Panics if either buffer's length differs from [`count`](Self::count).
    pub fn commit(&mut self, positions: &mut Vec<Vec2>, velocities: &mut Vec<Vec2>) {
        assert_eq!(positions.len(), self.count, "position buffer length");
        assert_eq!(velocities.len(), self.count, "velocity buffer length");
        std::mem::swap(&mut self.position, positions);
        std::mem::swap(&mut self.velocity, velocities);
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        position: Vec<Vec2>,
        velocity: Vec<Vec2>,
        kind: Vec<KindId>,
        schooling: Vec<bool>,
        school: Vec<SchoolId>,
        max_speed: Vec<f32>,
        kind_ranges: Vec<Range<usize>>,
    ) -> Self {
        Self {
            count: position.len(),
            position,
            velocity,
            kind,
            schooling,
            school,
            max_speed,
            kind_ranges,
        }
    }
}
