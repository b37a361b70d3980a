//! `shoal-sim`: tick scheduler and runner for the `shoal` flocking kernel.
//!
//! # Tick order
//!
//! ```text
//! each tick(dt):
//!   ① Flocking: one pass per schooling kind, over that kind's range
//!   ② Inter-school: schooling agents avoid schools of other kinds
//!   ③ Solo: non-schooling agents avoid everyone and wander
//!   ④ Integration: wall force, speed limits, move, clamp, bounce
//!   ⑤ Commit: swap the new buffers into the AgentStore
//! ```
//!
//! Stages ①–③ pass velocities through a two-buffer ping-pong; every stage
//! finishes before the next starts.  The store only changes at ⑤, so a
//! renderer reading between ticks never sees a half-finished tick.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs every kernel pass on Rayon's thread pool.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shoal_core::{ArenaBounds, SimConfig};
//! use shoal_sim::{NoopObserver, SimBuilder};
//!
//! let (store, rngs) = plan.into_store(config.seed)?;
//! let mut sim = SimBuilder::new(config, store, rngs)
//!     .bounds(ArenaBounds::default())
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod frame;
pub mod observer;
pub mod pipeline;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use frame::{RenderPose, smooth_heading};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use pipeline::{TickScratch, step};
pub use sim::Sim;
