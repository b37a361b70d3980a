//! `aquarium`: headless run of a mixed reef tank.
//!
//! Two schooling kinds (clownfish, blue tang) swim in clusters while eels
//! and a pair of crabs wander on their own.  Positions are written every
//! `output_interval_ticks` to `output/aquarium/`.
//!
//! Run with:
//!   cargo run -p aquarium --release [-- scenario.json]
//!
//! The optional scenario file overrides any of `config`, `params`, `bounds`,
//! `spawn` and `roster_csv`; missing fields keep their defaults.
//! Set `RUST_LOG=debug` for per-tick statistics.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use memory_stats::memory_stats;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shoal_agent::AgentStore;
use shoal_core::{ArenaBounds, SimConfig, SimRng, SimulationParameters, Tick};
use shoal_output::{CsvWriter, OutputWriter, SimOutputObserver};
use shoal_sim::{SimBuilder, SimObserver, TickStats};
use shoal_spawn::{SpawnPlanner, SpawnSettings, load_roster_csv, load_roster_reader};

// ── Memory helper ─────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

// ── Defaults ──────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output/aquarium";

// kind order is KindId order; crabs sit in the bottom-right corner.
const ROSTER_CSV: &str = "\
name,count,schooling,move_speed,random_spawn,spawn_x,spawn_y\n\
clownfish,45,true,2.0,true,,\n\
blue_tang,30,true,2.5,true,,\n\
moray_eel,4,false,1.5,true,,\n\
crab,2,false,0.5,false,8.5,-6.5\n\
";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Scenario {
    config:     Option<SimConfig>,
    params:     SimulationParameters,
    bounds:     ArenaBounds,
    spawn:      SpawnSettings,
    roster_csv: Option<PathBuf>,
}

impl Scenario {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario {}", path.display()))
    }

    fn sim_config(&self) -> SimConfig {
        self.config.clone().unwrap_or(SimConfig {
            total_ticks:           60 * 30, // 30 s at 60 Hz
            seed:                  42,
            output_interval_ticks: 30,
            ..SimConfig::default()
        })
    }
}

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    last_stats:    TickStats,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self {
            inner,
            snapshot_rows: 0,
            summary_rows:  0,
            last_stats:    TickStats::default(),
        }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.last_stats = *stats;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        self.snapshot_rows += agents.count();
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let scenario = match std::env::args_os().nth(1) {
        Some(path) => Scenario::load(Path::new(&path))?,
        None => Scenario::default(),
    };
    let config = scenario.sim_config();
    // Deserialized bounds skip the constructor checks.
    let bounds = ArenaBounds::new(scenario.bounds.center(), scenario.bounds.half_extents())?;

    println!("=== aquarium - shoal flocking kernel ===");
    println!(
        "Arena: {} x {}  |  Ticks: {}  |  dt: {:.4} s  |  Seed: {}",
        bounds.size().x,
        bounds.size().y,
        config.total_ticks,
        config.dt_secs,
        config.seed,
    );
    println!("mem[startup]      {:.0} MB", mem_mb());

    // 1. Roster.
    let roster = match &scenario.roster_csv {
        Some(path) => load_roster_csv(path)?,
        None => load_roster_reader(Cursor::new(ROSTER_CSV))?,
    };
    for (kind, spec) in roster.iter() {
        println!(
            "  {kind}: {:<10} x{:<4} {}",
            spec.name,
            spec.count,
            if spec.schooling { "schooling" } else { "solo" },
        );
    }

    // 2. Spawn.
    let mut rng = SimRng::new(config.seed);
    let plan = SpawnPlanner::new(scenario.spawn.clone())
        .bounds(bounds)
        .expect_population(roster.population())
        .plan(&roster, &mut rng)?;
    let (store, rngs) = plan.into_store(config.seed)?;

    // 3. Build sim.
    let mut sim = SimBuilder::new(config.clone(), store, rngs)
        .bounds(bounds)
        .params(scenario.params.clone())
        .build()?;
    println!("mem[after build]  {:.0} MB", mem_mb());

    // 4. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    info!(
        ticks = config.total_ticks,
        secs = elapsed.as_secs_f64(),
        "run complete"
    );
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  {:.1} ticks/s, {:.0} agent-ticks/s",
        config.total_ticks as f64 / elapsed.as_secs_f64().max(1e-9),
        (config.total_ticks as f64 * sim.agents().count() as f64) / elapsed.as_secs_f64().max(1e-9),
    );
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!(
        "  final mean speed {:.3}, max speed {:.3}",
        obs.last_stats.mean_speed, obs.last_stats.max_speed
    );
    println!("mem[after run]    {:.0} MB", mem_mb());

    // 6. First few render poses.
    println!();
    println!("{:<8} {:>9} {:>9} {:>9}", "Agent", "x", "y", "heading");
    println!("{}", "-".repeat(38));
    for (i, pose) in sim.frame().iter().take(8).enumerate() {
        println!(
            "{:<8} {:>9.3} {:>9.3} {:>9.3}",
            i, pose.position.x, pose.position.y, pose.heading
        );
    }

    Ok(())
}
