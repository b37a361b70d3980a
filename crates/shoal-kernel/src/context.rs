//! Read-only state shared by every kernel callback, and the kernel trait.

use shoal_agent::AgentStore;
use shoal_core::{AgentId, AgentRng, ArenaBounds, SimulationParameters, Vec2};

/// A read-only view of the simulation passed to every kernel callback.
///
/// Built once per tick.  `agents` holds the buffers settled at the end of
/// the previous tick; they do not change until every pass has finished.
#[derive(Copy, Clone)]
pub struct KernelContext<'a> {
    pub agents: &'a AgentStore,
    pub params: &'a SimulationParameters,
    pub bounds: &'a ArenaBounds,
    /// Seconds covered by this tick.
    pub dt: f32,
}

impl<'a> KernelContext<'a> {
    #[inline]
    pub fn new(
        agents: &'a AgentStore,
        params: &'a SimulationParameters,
        bounds: &'a ArenaBounds,
        dt: f32,
    ) -> Self {
        Self { agents, params, bounds, dt }
    }
}

/// One velocity-only stage of the tick.
///
/// [`run_pass`](crate::run_pass) calls [`steer`](Self::steer) for each agent
/// in a range, possibly from many threads at once, so implementations must
/// be `Send + Sync` and keep per-agent state out of `self`.
pub trait VelocityKernel: Send + Sync {
    /// Whether this kernel touches `agent`.  Agents it skips keep their
    /// incoming velocity.
    fn applies_to(&self, agent: AgentId, ctx: &KernelContext<'_>) -> bool;

    /// Return `agent`'s new velocity given the velocity produced by the
    /// previous stage.
    fn steer(
        &self,
        agent: AgentId,
        velocity: Vec2,
        ctx: &KernelContext<'_>,
        rng: &mut AgentRng,
    ) -> Vec2;
}
