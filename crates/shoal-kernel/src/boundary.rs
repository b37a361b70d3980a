//! Wall repulsion, speed limits, integration and inelastic bounce.

use shoal_core::force::falloff;
use shoal_core::{AgentId, AgentRng, ArenaBounds, SimulationParameters, Vec2};

use crate::KernelContext;

/// Boundary forces weaker than this (squared) get no jitter.
const JITTER_THRESHOLD_SQ: f32 = 0.01;
/// Half-width of the jitter added while a boundary force is active.
const WALL_JITTER: f32 = 0.3;
/// Speeds below this (squared) are replaced by a fresh random heading.
const MIN_SPEED_SQ: f32 = 0.01;
const RESTART_SPEED: f32 = 0.1;
/// Fraction of the outward velocity component kept after a bounce.
const RESTITUTION: f32 = 0.8;
/// Half-width of the jitter added on a bounce.
const BOUNCE_JITTER: f32 = 0.5;

/// Final stage of the tick: the only kernel that moves agents.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoundaryKernel;

impl BoundaryKernel {
    /// Inward push on an agent at `position`.  Each axis responds to the
    /// nearer edge only, with strength `boundary_force · falloff(dist, buffer)`.
    pub fn wall_force(position: Vec2, bounds: &ArenaBounds, params: &SimulationParameters) -> Vec2 {
        let rel = position - bounds.center();
        let half = bounds.half_extents();
        Vec2::new(
            edge_push(rel.x, half.x, params.boundary_buffer),
            edge_push(rel.y, half.y, params.boundary_buffer),
        ) * params.boundary_force
    }

    /// Compute `agent`'s `(position, velocity)` at the end of the tick from
    /// its settled position and the velocity left by the steering stages.
    pub fn integrate(
        agent: AgentId,
        velocity: Vec2,
        ctx: &KernelContext<'_>,
        rng: &mut AgentRng,
    ) -> (Vec2, Vec2) {
        let bounds = ctx.bounds;
        let dt = ctx.dt;
        let max_speed = ctx.agents.max_speed(agent);
        let position = ctx.agents.position(agent);

        let force = Self::wall_force(position, bounds, ctx.params);
        let mut v = velocity + force * dt;
        if force.length_squared() > JITTER_THRESHOLD_SQ {
            v += rng.in_square(1.0) * WALL_JITTER * dt;
        }

        v = v.clamp_length_max(max_speed);
        if v.length_squared() < MIN_SPEED_SQ {
            v = rng.unit_vector() * RESTART_SPEED;
        }

        let p = bounds.clamp(position + v * dt);

        let rel = p - bounds.center();
        let half = bounds.half_extents();
        if rel.x.abs() >= half.x && v.x * rel.x > 0.0 {
            v.x = -v.x * RESTITUTION;
            v += rng.in_square(BOUNCE_JITTER);
        }
        if rel.y.abs() >= half.y && v.y * rel.y > 0.0 {
            v.y = -v.y * RESTITUTION;
            v += rng.in_square(BOUNCE_JITTER);
        }

        (p, v.clamp_length_max(max_speed))
    }
}

/// Signed unit-strength push along one axis.
fn edge_push(rel: f32, half: f32, buffer: f32) -> f32 {
    if rel > half - buffer {
        -falloff(half - rel, buffer)
    } else if rel < -half + buffer {
        falloff(rel + half, buffer)
    } else {
        0.0
    }
}
