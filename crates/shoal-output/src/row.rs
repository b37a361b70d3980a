//! Plain data row types written by output backends.

use shoal_agent::AgentStore;
use shoal_core::Tick;

/// One agent's kinematic state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    pub kind:     u16,
    pub school:   u16,
    pub x:        f32,
    pub y:        f32,
    pub vx:       f32,
    pub vy:       f32,
    /// Radians, `atan2(vy, vx)`.
    pub heading:  f32,
}

impl AgentSnapshotRow {
    /// One row per agent, in store order.
    pub fn collect(tick: Tick, agents: &AgentStore) -> Vec<AgentSnapshotRow> {
        agents
            .agent_ids()
            .map(|id| {
                let p = agents.position(id);
                let v = agents.velocity(id);
                AgentSnapshotRow {
                    agent_id: id.0,
                    tick:     tick.0,
                    kind:     agents.kind(id).0,
                    school:   agents.school(id).0,
                    x:        p.x,
                    y:        p.y,
                    vx:       v.x,
                    vy:       v.y,
                    heading:  agents.heading(id),
                }
            })
            .collect()
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub sim_time_secs: f64,
    pub agents:        u64,
    pub mean_speed:    f32,
    pub max_speed:     f32,
}
