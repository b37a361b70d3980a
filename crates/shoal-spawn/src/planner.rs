//! Initial placement of every agent.
//!
//! # Layout
//!
//! Kinds are laid out in roster order, so each kind's agents occupy one
//! contiguous index range of the store.
//!
//! - **Schooling kinds** are split into `clamp(count / 15, 1, 3)` clusters.
//!   Agent `i` joins cluster `i mod clusters` and is placed at a short random
//!   offset from the cluster center.  Random-spawn kinds scatter their
//!   centers over the middle of the arena and head each cluster its own way;
//!   fixed-spawn kinds stack every center on the spawn point and share one
//!   loosely jittered kind heading.
//! - **Solo kinds** spawn anywhere in the arena with a random heading, or
//!   in a small disc around the spawn point with the jittered kind heading.
//!
//! Every agent starts at its kind's `move_speed`, which is also its speed cap.

use shoal_agent::{AgentInit, AgentRngs, AgentStore, AgentStoreBuilder};
use shoal_core::{ArenaBounds, KindId, SchoolId, ShoalError, SimRng, Vec2};
use tracing::{debug, info, warn};

use crate::{KindSpec, Roster, SpawnError, SpawnResult, SpawnSettings};

// ── SpawnPlan ─────────────────────────────────────────────────────────────────

/// The computed initial state of every agent, in store order.
#[derive(Clone, Debug)]
pub struct SpawnPlan {
    agents: Vec<AgentInit>,
    kind_count: usize,
    cluster_count: usize,
}

impl SpawnPlan {
    pub fn agents(&self) -> &[AgentInit] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn kind_count(&self) -> usize {
        self.kind_count
    }

    /// Clusters created across all schooling kinds.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Allocate the agent store for this plan, seeding per-agent RNGs from `seed`.
    pub fn into_store(self, seed: u64) -> SpawnResult<(AgentStore, AgentRngs)> {
        let built = AgentStoreBuilder::new(self.kind_count, seed)
            .agents(self.agents)
            .build()?;
        Ok(built)
    }
}

// ── SpawnPlanner ──────────────────────────────────────────────────────────────

/// Computes a [`SpawnPlan`] from a [`Roster`] and the arena bounds.
#[derive(Clone, Debug, Default)]
pub struct SpawnPlanner {
    settings: SpawnSettings,
    bounds: Option<ArenaBounds>,
    expected_population: Option<usize>,
}

impl SpawnPlanner {
    pub fn new(settings: SpawnSettings) -> Self {
        Self {
            settings,
            bounds: None,
            expected_population: None,
        }
    }

    /// The arena to spawn into.  Required.
    pub fn bounds(mut self, bounds: ArenaBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Fail unless the roster spawns exactly `n` agents.
    pub fn expect_population(mut self, n: usize) -> Self {
        self.expected_population = Some(n);
        self
    }

    /// Lay out every agent of `roster`.
    ///
    /// All validation happens before any sampling, so an error leaves `rng`
    /// untouched.
    pub fn plan(&self, roster: &Roster, rng: &mut SimRng) -> SpawnResult<SpawnPlan> {
        let bounds = self.bounds.ok_or(SpawnError::MissingBounds)?;
        self.settings.validate()?;
        self.check_roster(roster)?;

        let mut agents = Vec::with_capacity(roster.population());
        let mut cluster_count = 0;

        for (kind, spec) in roster.iter() {
            if !spec.random_spawn && !bounds.contains(spec.spawn_point) {
                warn!(
                    kind = %spec.name,
                    x = spec.spawn_point.x,
                    y = spec.spawn_point.y,
                    "spawn point lies outside the arena; agents will be clamped inside"
                );
            }

            if spec.schooling {
                cluster_count += self.place_school(kind, spec, &bounds, rng, &mut agents);
            } else {
                self.place_solo(kind, spec, &bounds, rng, &mut agents);
            }
        }

        info!(
            agents = agents.len(),
            kinds = roster.len(),
            clusters = cluster_count,
            "spawn plan complete"
        );

        Ok(SpawnPlan {
            agents,
            kind_count: roster.len(),
            cluster_count,
        })
    }

    fn check_roster(&self, roster: &Roster) -> SpawnResult<()> {
        if let Some(expected) = self.expected_population {
            if roster.is_empty() && expected > 0 {
                return Err(SpawnError::EmptyRoster { expected });
            }
            let got = roster.population();
            if got != expected {
                return Err(SpawnError::PopulationMismatch { expected, got });
            }
        }
        if u16::try_from(roster.len()).is_err() {
            let msg = format!("{} kinds exceed the KindId range", roster.len());
            return Err(ShoalError::Config(msg).into());
        }
        for (_, spec) in roster.iter() {
            if !spec.move_speed.is_finite() || spec.move_speed <= 0.0 {
                return Err(SpawnError::InvalidMoveSpeed {
                    kind: spec.name.clone(),
                    speed: spec.move_speed,
                });
            }
        }
        Ok(())
    }

    /// Returns the number of clusters created.
    fn place_school(
        &self,
        kind: KindId,
        spec: &KindSpec,
        bounds: &ArenaBounds,
        rng: &mut SimRng,
        out: &mut Vec<AgentInit>,
    ) -> usize {
        if spec.count == 0 {
            return 0;
        }
        let s = &self.settings;
        let clusters = s.cluster_count(spec.count);
        let spread = bounds.size() * s.cluster_spread;

        let centers: Vec<(Vec2, f32)> = (0..clusters)
            .map(|_| {
                let center = if spec.random_spawn {
                    bounds.center() + sample_box(rng, spread)
                } else {
                    spec.spawn_point
                };
                (center, rng.angle_deg())
            })
            .collect();
        for (c, (center, heading)) in centers.iter().enumerate() {
            debug!(kind = %spec.name, cluster = c, x = center.x, y = center.y, heading, "cluster");
        }

        let kind_heading = rng.angle_deg();
        for i in 0..spec.count {
            let cluster = i % clusters;
            let (center, cluster_heading) = centers[cluster];

            let radius = rng.gen_range(s.cluster_radius_min..=s.cluster_radius_max);
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let position = bounds.clamp(center + Vec2::from_angle(angle) * radius);

            let heading = if spec.random_spawn {
                rng.jitter_deg(cluster_heading, s.school_heading_jitter_deg)
            } else {
                rng.jitter_deg(kind_heading, s.fixed_heading_jitter_deg)
            };

            out.push(init(kind, spec, position, heading, SchoolId(cluster as u16)));
        }
        clusters
    }

    fn place_solo(
        &self,
        kind: KindId,
        spec: &KindSpec,
        bounds: &ArenaBounds,
        rng: &mut SimRng,
        out: &mut Vec<AgentInit>,
    ) {
        let s = &self.settings;
        let spread = bounds.size() * s.solo_spread;
        let kind_heading = rng.angle_deg();

        for _ in 0..spec.count {
            let (position, heading) = if spec.random_spawn {
                (bounds.center() + sample_box(rng, spread), rng.angle_deg())
            } else {
                (
                    spec.spawn_point + rng.in_unit_disc() * s.fixed_solo_radius,
                    rng.jitter_deg(kind_heading, s.fixed_heading_jitter_deg),
                )
            };
            out.push(init(kind, spec, bounds.clamp(position), heading, SchoolId(0)));
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Uniform in `[-half, half]` per axis.
fn sample_box(rng: &mut SimRng, half: Vec2) -> Vec2 {
    Vec2::new(
        rng.gen_range(-half.x..=half.x),
        rng.gen_range(-half.y..=half.y),
    )
}

fn init(kind: KindId, spec: &KindSpec, position: Vec2, heading_deg: f32, school: SchoolId) -> AgentInit {
    AgentInit {
        position,
        velocity: Vec2::from_angle(heading_deg.to_radians()) * spec.move_speed,
        kind,
        schooling: spec.schooling,
        school,
        max_speed: spec.move_speed,
    }
}
