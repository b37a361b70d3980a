//! Simulation observer trait for progress reporting and data collection.

use shoal_agent::AgentStore;
use shoal_core::Tick;

/// Summary of the population after one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    pub agents: usize,
    pub mean_speed: f32,
    pub max_speed: f32,
    /// Simulated seconds since tick 0, including this tick.
    pub elapsed_secs: f64,
}

impl TickStats {
    pub fn from_store(agents: &AgentStore, elapsed_secs: f64) -> Self {
        let n = agents.count();
        let (sum, max) = agents
            .velocities()
            .iter()
            .map(|v| v.length())
            .fold((0.0_f64, 0.0_f32), |(sum, max), s| (sum + s as f64, max.max(s)));
        Self {
            agents: n,
            mean_speed: if n == 0 { 0.0 } else { (sum / n as f64) as f32 },
            max_speed: max,
            elapsed_secs,
        }
    }
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: mean speed {:.2}", stats.mean_speed);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any kernel runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick has been committed.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks)
    /// with the committed state, so output writers can record positions
    /// without the sim knowing any output format.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
