//! Fluent builder for constructing a [`Sim`].

use shoal_agent::{AgentRngs, AgentStore};
use shoal_core::{ArenaBounds, SimConfig, SimulationParameters};
use tracing::info;

use crate::{Sim, SimError, SimResult, TickScratch};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: dt, total ticks, seed, thread count, …
/// - [`AgentStore`] + [`AgentRngs`]: from `SpawnPlan::into_store` or
///   [`shoal_agent::AgentStoreBuilder`]
/// - [`ArenaBounds`] via [`.bounds()`](Self::bounds)
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                            |
/// |----------------|------------------------------------|
/// | `.params(p)`   | `SimulationParameters::default()`  |
pub struct SimBuilder {
    config: SimConfig,
    agents: AgentStore,
    rngs:   AgentRngs,
    bounds: Option<ArenaBounds>,
    params: SimulationParameters,
}

impl SimBuilder {
    /// Create a builder with the agent population.
    pub fn new(config: SimConfig, agents: AgentStore, rngs: AgentRngs) -> Self {
        Self {
            config,
            agents,
            rngs,
            bounds: None,
            params: SimulationParameters::default(),
        }
    }

    /// The arena agents are confined to.
    pub fn bounds(mut self, bounds: ArenaBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn params(mut self, params: SimulationParameters) -> Self {
        self.params = params;
        self
    }

    /// Validate inputs, allocate tick buffers, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let bounds = self.bounds.ok_or(SimError::MissingBounds)?;
        self.params.validate()?;

        let agent_count = self.agents.count();
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        if !self.config.dt_secs.is_finite() || self.config.dt_secs < 0.0 {
            return Err(SimError::Config(format!(
                "dt_secs must be finite and non-negative, got {}",
                self.config.dt_secs
            )));
        }
        if self.config.num_threads == Some(0) {
            return Err(SimError::Config("num_threads must be at least 1".into()));
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        #[cfg(not(feature = "parallel"))]
        {
            if self.config.num_threads.is_some_and(|n| n > 1) {
                tracing::warn!("num_threads is ignored without the `parallel` feature");
            }
        }

        info!(
            agents = agent_count,
            kinds = self.agents.kind_count(),
            threads = ?self.config.num_threads,
            "simulation built"
        );

        Ok(Sim {
            clock:   self.config.make_clock(),
            config:  self.config,
            params:  self.params,
            bounds,
            scratch: TickScratch::new(agent_count),
            agents:  self.agents,
            rngs:    self.rngs,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
