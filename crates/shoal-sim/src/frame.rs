//! What a renderer reads after each tick.

use std::f32::consts::{PI, TAU};

use shoal_agent::AgentStore;
use shoal_core::Vec2;

/// Where to draw one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderPose {
    pub position: Vec2,
    /// Direction of travel in radians, `atan2(vy, vx)`.
    pub heading: f32,
}

impl RenderPose {
    /// One pose per agent, in store order.
    pub fn collect(agents: &AgentStore) -> Vec<RenderPose> {
        agents
            .positions()
            .iter()
            .zip(agents.velocities())
            .map(|(&position, v)| RenderPose {
                position,
                heading: v.y.atan2(v.x),
            })
            .collect()
    }
}

/// Turn `current` towards `target` along the shorter arc, covering the
/// fraction `rotation_speed · dt` (clamped to `[0, 1]`) of the difference.
///
/// Angles are in radians.  Renderers use this to keep sprites from snapping
/// when an agent's heading jumps.
pub fn smooth_heading(current: f32, target: f32, rotation_speed: f32, dt: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    }
    current + delta * (rotation_speed * dt).clamp(0.0, 1.0)
}
