use shoal_agent::{AgentRngs, AgentStore};
use shoal_core::{ArenaBounds, SimClock, SimConfig, SimulationParameters, Tick};
use tracing::debug;

use crate::pipeline::{self, TickScratch};
use crate::{RenderPose, SimError, SimObserver, SimResult, TickStats};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns the agent population and advances it one tick at a time with
/// [`tick`](Self::tick), or for a configured number of ticks with
/// [`run`](Self::run).  The caller owns timing: interactive hosts pass their
/// frame delta to `tick`, headless runs use `config.dt_secs`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration (total ticks, seed, dt, …).
    pub config: SimConfig,

    /// Current tick and accumulated simulated seconds.
    pub clock: SimClock,

    pub(crate) params:  SimulationParameters,
    pub(crate) bounds:  ArenaBounds,
    pub(crate) agents:  AgentStore,
    pub(crate) rngs:    AgentRngs,
    pub(crate) scratch: TickScratch,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl Sim {
    // ── Accessors ─────────────────────────────────────────────────────────

    /// The committed agent state.  Only changes inside [`tick`](Self::tick).
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Replace the parameters between ticks.
    pub fn set_params(&mut self, params: SimulationParameters) -> SimResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    /// Position and heading of every agent, in store order.
    pub fn frame(&self) -> Vec<RenderPose> {
        RenderPose::collect(&self.agents)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance the simulation by one tick of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> SimResult<TickStats> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::Config(format!(
                "dt must be finite and non-negative, got {dt}"
            )));
        }

        let agents = &mut self.agents;
        let rngs = &mut self.rngs;
        let scratch = &mut self.scratch;
        let params = &self.params;
        let bounds = &self.bounds;

        #[cfg(not(feature = "parallel"))]
        {
            pipeline::step(agents, rngs, scratch, params, bounds, dt);
        }

        #[cfg(feature = "parallel")]
        {
            match &self.pool {
                Some(pool) => {
                    pool.install(|| pipeline::step(agents, rngs, scratch, params, bounds, dt))
                }
                None => pipeline::step(agents, rngs, scratch, params, bounds, dt),
            }
        }

        let tick = self.clock.current_tick;
        self.clock.advance(dt);

        let stats = TickStats::from_store(&self.agents, self.clock.elapsed_secs);
        debug!(
            %tick,
            agents = stats.agents,
            mean_speed = stats.mean_speed,
            max_speed = stats.max_speed,
            "tick complete"
        );
        Ok(stats)
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.observed_tick(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_tick(observer)?;
        }
        Ok(())
    }

    fn observed_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now: Tick = self.clock.current_tick;
        observer.on_tick_start(now);
        let stats = self.tick(self.config.dt_secs)?;
        observer.on_tick_end(now, &stats);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents);
        }
        Ok(())
    }
}
