//! Schooling agents keep clear of schools of other kinds.

use shoal_core::force::{guard, repulsion};
use shoal_core::{AgentId, AgentRng, Vec2};

use crate::{KernelContext, VelocityKernel};

/// Discount on pushes from an agent with the same school number.
const SAME_SCHOOL_DISCOUNT: f32 = 0.5;

#[derive(Copy, Clone, Debug, Default)]
pub struct InterSchoolKernel;

impl VelocityKernel for InterSchoolKernel {
    fn applies_to(&self, agent: AgentId, ctx: &KernelContext<'_>) -> bool {
        ctx.agents.is_schooling(agent)
    }

    fn steer(
        &self,
        agent: AgentId,
        velocity: Vec2,
        ctx: &KernelContext<'_>,
        _rng: &mut AgentRng,
    ) -> Vec2 {
        let store = ctx.agents;
        let radius = ctx.params.inter_school_avoidance_radius;
        let me = store.position(agent);
        let kind = store.kind(agent);
        let school = store.school(agent);

        let positions = store.positions();
        let kinds = store.kinds();
        let schooling = store.schooling();
        let schools = store.schools();

        let mut sum = Vec2::ZERO;
        let mut count = 0u32;
        for i in 0..store.count() {
            if !schooling[i] || kinds[i] == kind {
                continue;
            }
            let d = me.distance(positions[i]);
            if d >= radius {
                continue;
            }
            // Schools are numbered per kind, so this matches on number only.
            let m = if schools[i] == school { SAME_SCHOOL_DISCOUNT } else { 1.0 };
            sum += repulsion(me, positions[i], d, radius) * m;
            count += 1;
        }

        if count == 0 {
            return velocity;
        }
        let avoid = guard(sum / count as f32);
        velocity + avoid * ctx.params.inter_school_avoidance_factor * ctx.dt
    }
}
