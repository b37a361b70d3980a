//! Validated builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use shoal_agent::{AgentInit, AgentStoreBuilder};
//! use shoal_core::{KindId, SchoolId, Vec2};
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*kind_count=*/ 1, /*seed=*/ 42)
//!     .agent(AgentInit {
//!         position: Vec2::ZERO,
//!         velocity: Vec2::X,
//!         kind: KindId(0),
//!         schooling: true,
//!         school: SchoolId(0),
//!         max_speed: 2.0,
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.count(), 1);
//! assert_eq!(rngs.len(), 1);
//! ```

use std::ops::Range;

use shoal_core::{KindId, SchoolId, ShoalError, ShoalResult, Vec2};

use crate::{AgentRngs, AgentStore};

/// Initial state of one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentInit {
    pub position: Vec2,
    pub velocity: Vec2,
    pub kind: KindId,
    pub schooling: bool,
    pub school: SchoolId,
    pub max_speed: f32,
}

/// Builder for [`AgentStore`] + [`AgentRngs`].
///
/// Agents receive ids in insertion order.  All agents of one kind must be
/// added consecutively and share one `schooling` flag.
pub struct AgentStoreBuilder {
    kind_count: usize,
    seed: u64,
    agents: Vec<AgentInit>,
}

impl AgentStoreBuilder {
    /// Create a builder for a roster of `kind_count` kinds using `seed` as
    /// the global RNG seed.
    pub fn new(kind_count: usize, seed: u64) -> Self {
        Self {
            kind_count,
            seed,
            agents: Vec::new(),
        }
    }

    /// Reserve room for `additional` more agents.
    pub fn with_capacity(mut self, additional: usize) -> Self {
        self.agents.reserve(additional);
        self
    }

    /// Append one agent.
    pub fn agent(mut self, init: AgentInit) -> Self {
        self.agents.push(init);
        self
    }

    /// Append every agent yielded by `iter`.
    pub fn agents(mut self, iter: impl IntoIterator<Item = AgentInit>) -> Self {
        self.agents.extend(iter);
        self
    }

    /// Construct `AgentStore` and `AgentRngs`.
    ///
    /// Fails with [`ShoalError::Config`] if an agent has a non-finite
    /// position or velocity, a speed cap that is not finite and positive, a
    /// kind out of range, or if a kind's agents are not contiguous or mix
    /// schooling and solo agents.  Nothing is allocated on failure beyond
    /// what the builder already holds.
    pub fn build(self) -> ShoalResult<(AgentStore, AgentRngs)> {
        let count = self.agents.len();
        if u32::try_from(count).is_err() {
            return Err(ShoalError::Config(format!(
                "{count} agents exceed the AgentId range"
            )));
        }
        for (i, a) in self.agents.iter().enumerate() {
            check_agent(i, a)?;
        }

        let kind_ranges = self.kind_ranges()?;

        let mut position = Vec::with_capacity(count);
        let mut velocity = Vec::with_capacity(count);
        let mut kind = Vec::with_capacity(count);
        let mut schooling = Vec::with_capacity(count);
        let mut school = Vec::with_capacity(count);
        let mut max_speed = Vec::with_capacity(count);

        for a in &self.agents {
            position.push(a.position);
            velocity.push(a.velocity);
            kind.push(a.kind);
            schooling.push(a.schooling);
            school.push(a.school);
            max_speed.push(a.max_speed);
        }

        let store = AgentStore::from_parts(
            position,
            velocity,
            kind,
            schooling,
            school,
            max_speed,
            kind_ranges,
        );
        let rngs = AgentRngs::new(count, self.seed);

        Ok((store, rngs))
    }

    fn kind_ranges(&self) -> ShoalResult<Vec<Range<usize>>> {
        let mut ranges: Vec<Option<Range<usize>>> = vec![None; self.kind_count];

        for (i, a) in self.agents.iter().enumerate() {
            let k = a.kind.index();
            if k >= self.kind_count {
                return Err(ShoalError::Config(format!(
                    "agent {i} has {} but the roster has {} kinds",
                    a.kind, self.kind_count
                )));
            }
            if let Some(r) = &mut ranges[k] {
                if self.agents[r.start].schooling != a.schooling {
                    return Err(ShoalError::Config(format!(
                        "{} mixes schooling and solo agents (agent {} vs agent {i})",
                        a.kind, r.start
                    )));
                }
                if r.end != i {
                    return Err(ShoalError::Config(format!(
                        "{} is not contiguous: agents {}..{} then agent {i}",
                        a.kind, r.start, r.end
                    )));
                }
                r.end = i + 1;
            } else {
                ranges[k] = Some(i..i + 1);
            }
        }

        // Absent kinds get an empty range at the end of the previous kind.
        let mut next = 0;
        Ok(ranges
            .into_iter()
            .map(|r| match r {
                Some(r) => {
                    next = r.end;
                    r
                }
                None => next..next,
            })
            .collect())
    }
}

fn check_agent(i: usize, a: &AgentInit) -> ShoalResult<()> {
    if !a.position.is_finite() || !a.velocity.is_finite() {
        return Err(ShoalError::Config(format!(
            "agent {i} has non-finite state: position {}, velocity {}",
            a.position, a.velocity
        )));
    }
    if !a.max_speed.is_finite() || a.max_speed <= 0.0 {
        return Err(ShoalError::Config(format!(
            "agent {i} max_speed must be finite and positive, got {}",
            a.max_speed
        )));
    }
    Ok(())
}
