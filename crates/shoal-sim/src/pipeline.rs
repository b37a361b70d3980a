//! The fixed per-tick kernel sequence.

use shoal_agent::{AgentRngs, AgentStore};
use shoal_core::{ArenaBounds, KindId, SimulationParameters, Vec2};
use shoal_kernel::{
    FlockingKernel, InterSchoolKernel, KernelContext, SoloKernel, run_integration, run_pass,
};

/// Reusable buffers for one tick.
///
/// `stage` and `spare` ping-pong between the velocity stages; `positions`
/// and `velocities` receive the integrated result and are swapped into the
/// store on commit, which hands the store's previous buffers back here.
#[derive(Clone, Debug, Default)]
pub struct TickScratch {
    stage: Vec<Vec2>,
    spare: Vec<Vec2>,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
}

impl TickScratch {
    pub fn new(count: usize) -> Self {
        let mut s = Self::default();
        s.resize(count);
        s
    }

    fn resize(&mut self, count: usize) {
        for buf in [&mut self.stage, &mut self.spare, &mut self.positions, &mut self.velocities] {
            buf.resize(count, Vec2::ZERO);
        }
    }

    fn swap_stage(&mut self) {
        std::mem::swap(&mut self.stage, &mut self.spare);
    }
}

/// Advance every agent by one tick of `dt` seconds.
///
/// Runs flocking (per schooling kind), inter-school avoidance, solo
/// avoidance and integration in that order, then commits.  Each stage reads
/// the previous stage's velocities and the store's settled positions.
pub fn step(
    agents: &mut AgentStore,
    rngs: &mut AgentRngs,
    scratch: &mut TickScratch,
    params: &SimulationParameters,
    bounds: &ArenaBounds,
    dt: f32,
) {
    let n = agents.count();
    if n == 0 {
        return;
    }
    scratch.resize(n);

    {
        let ctx = KernelContext::new(agents, params, bounds, dt);
        scratch.stage.copy_from_slice(agents.velocities());

        // ① Flocking: kinds that do not school pass through unchanged.
        scratch.spare.copy_from_slice(&scratch.stage);
        for k in 0..agents.kind_count() {
            let kind = KindId(k as u16);
            if agents.kind_is_schooling(kind) {
                let range = agents.kind_range(kind);
                run_pass(&FlockingKernel, &ctx, range, &scratch.stage, &mut scratch.spare, rngs);
            }
        }
        scratch.swap_stage();

        // ② Inter-school avoidance.
        run_pass(&InterSchoolKernel, &ctx, 0..n, &scratch.stage, &mut scratch.spare, rngs);
        scratch.swap_stage();

        // ③ Solo avoidance.
        run_pass(&SoloKernel, &ctx, 0..n, &scratch.stage, &mut scratch.spare, rngs);
        scratch.swap_stage();

        // ④ Integration.
        run_integration(&ctx, &scratch.stage, &mut scratch.positions, &mut scratch.velocities, rngs);
    }

    // ⑤ Commit.
    agents.commit(&mut scratch.positions, &mut scratch.velocities);
}
