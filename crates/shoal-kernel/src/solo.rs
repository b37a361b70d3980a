//! Non-schooling agents dodge everyone and wander.

use shoal_core::force::{guard, repulsion};
use shoal_core::{AgentId, AgentRng, Vec2};

use crate::{KernelContext, VelocityKernel};

/// Extra push away from schooling neighbours.
const FLEE_SCHOOL_WEIGHT: f32 = 1.5;

#[derive(Copy, Clone, Debug, Default)]
pub struct SoloKernel;

impl VelocityKernel for SoloKernel {
    fn applies_to(&self, agent: AgentId, ctx: &KernelContext<'_>) -> bool {
        !ctx.agents.is_schooling(agent)
    }

    fn steer(
        &self,
        agent: AgentId,
        velocity: Vec2,
        ctx: &KernelContext<'_>,
        rng: &mut AgentRng,
    ) -> Vec2 {
        let store = ctx.agents;
        let p = ctx.params;
        let me = store.position(agent);
        let positions = store.positions();
        let schooling = store.schooling();

        let mut sum = Vec2::ZERO;
        for (i, &other) in positions.iter().enumerate() {
            if i == agent.index() {
                continue;
            }
            let d = me.distance(other);
            if d >= p.avoidance_radius {
                continue;
            }
            let m = if schooling[i] { FLEE_SCHOOL_WEIGHT } else { 1.0 };
            sum += repulsion(me, other, d, p.avoidance_radius) * m;
        }

        let wander = rng.in_square(1.0);
        velocity + guard(sum) * p.avoidance_factor * ctx.dt + wander * p.random_movement_factor * ctx.dt
    }
}
