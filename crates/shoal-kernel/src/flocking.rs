//! Cohesion, alignment and separation within one kind.

use shoal_core::force::{falloff, guard};
use shoal_core::{AgentId, AgentRng, Vec2};

use crate::{KernelContext, VelocityKernel};

/// Weight of a neighbour from the agent's own spawn cluster.
const SAME_SCHOOL_WEIGHT: f32 = 1.5;
/// Overall gain on the combined cohesion/alignment/separation force.
const FLOCK_GAIN: f32 = 2.0;
/// Scale of the wander impulse for an agent with no neighbours.
const LONER_WANDER: f32 = 0.8;

/// Raw neighbourhood sums for one agent, before guarding and weighting.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FlockingForces {
    /// Weighted sum of neighbour positions.
    pub cohesion: Vec2,
    /// Weighted sum of neighbour velocities.
    pub alignment: Vec2,
    /// Sum of falloff-scaled pushes away from close neighbours.
    pub separation: Vec2,
    /// Neighbours inside `schooling_radius`.
    pub neighbors: u32,
}

/// Classic boids steering between agents of the same schooling kind.
///
/// Run once per schooling kind over that kind's index range; neighbours are
/// only searched within the same range.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlockingKernel;

impl FlockingKernel {
    /// Accumulate the neighbourhood sums for `agent`.
    pub fn forces(agent: AgentId, ctx: &KernelContext<'_>) -> FlockingForces {
        let store = ctx.agents;
        let p = ctx.params;
        let me = store.position(agent);
        let school = store.school(agent);

        let positions = store.positions();
        let velocities = store.velocities();
        let schools = store.schools();

        let mut f = FlockingForces::default();
        for i in store.kind_range(store.kind(agent)) {
            if i == agent.index() {
                continue;
            }
            let other = positions[i];
            let d = me.distance(other);
            if d >= p.schooling_radius {
                continue;
            }

            let w = if schools[i] == school { SAME_SCHOOL_WEIGHT } else { 1.0 };
            f.cohesion += other * w;
            f.alignment += velocities[i] * w;
            f.neighbors += 1;

            if d < p.separation_radius {
                f.separation += (me - other).normalize_or_zero() * falloff(d, p.separation_radius);
            }
        }
        f
    }
}

impl VelocityKernel for FlockingKernel {
    fn applies_to(&self, agent: AgentId, ctx: &KernelContext<'_>) -> bool {
        ctx.agents.is_schooling(agent)
    }

    fn steer(
        &self,
        agent: AgentId,
        velocity: Vec2,
        ctx: &KernelContext<'_>,
        rng: &mut AgentRng,
    ) -> Vec2 {
        let p = ctx.params;
        let f = Self::forces(agent, ctx);

        if f.neighbors == 0 {
            return velocity + rng.in_unit_disc() * p.random_movement_factor * LONER_WANDER * ctx.dt;
        }

        let n = f.neighbors as f32;
        let cohesion = guard(f.cohesion / n - ctx.agents.position(agent));
        let alignment = guard(f.alignment / n);
        let separation = guard(f.separation);

        let total = cohesion * p.cohesion_factor
            + alignment * p.alignment_factor
            + separation * p.separation_factor;
        velocity + total * FLOCK_GAIN * ctx.dt
    }
}
