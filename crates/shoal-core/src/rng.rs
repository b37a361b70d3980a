//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state, so a kernel pass can hand each worker
//!   a disjoint slice of generators.
//! - The random stream an agent sees depends only on its own draws, never
//!   on how agents were partitioned across threads.
//! - All RNG calls are local to the owning thread; no synchronisation needed.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Create one per agent at store construction; it lives in a parallel
/// `Vec<AgentRng>` alongside the other SoA arrays.  Only the kernel pass that
/// is currently running may advance it.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Vector with both components uniform in `[-half, half]`.
    #[inline]
    pub fn in_square(&mut self, half: f32) -> Vec2 {
        in_square(&mut self.0, half)
    }

    /// Uniform point inside the unit disc.
    #[inline]
    pub fn in_unit_disc(&mut self) -> Vec2 {
        in_unit_disc(&mut self.0)
    }

    /// Unit vector with a uniformly distributed angle.
    #[inline]
    pub fn unit_vector(&mut self) -> Vec2 {
        Vec2::from_angle(self.0.gen_range(0.0..std::f32::consts::TAU))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (spawn planning).
///
/// Used only in single-threaded contexts.  Per-agent randomness during a
/// tick always comes from [`AgentRng`].
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform angle in degrees, `[0, 360)`.
    #[inline]
    pub fn angle_deg(&mut self) -> f32 {
        self.0.gen_range(0.0..360.0)
    }

    /// `base_deg` plus a uniform offset in `[-spread_deg, spread_deg]`.
    #[inline]
    pub fn jitter_deg(&mut self, base_deg: f32, spread_deg: f32) -> f32 {
        if spread_deg <= 0.0 {
            return base_deg;
        }
        base_deg + self.0.gen_range(-spread_deg..=spread_deg)
    }

    /// Uniform point inside the unit disc.
    #[inline]
    pub fn in_unit_disc(&mut self) -> Vec2 {
        in_unit_disc(&mut self.0)
    }
}

// ── Shared samplers ───────────────────────────────────────────────────────────

fn in_square(rng: &mut SmallRng, half: f32) -> Vec2 {
    Vec2::new(rng.gen_range(-1.0..=1.0_f32), rng.gen_range(-1.0..=1.0_f32)) * half
}

// Rejection sampling keeps the distribution uniform without a sqrt.
fn in_unit_disc(rng: &mut SmallRng) -> Vec2 {
    loop {
        let p = Vec2::new(rng.gen_range(-1.0..=1.0_f32), rng.gen_range(-1.0..=1.0_f32));
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}
