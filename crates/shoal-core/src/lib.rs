//! `shoal-core`: foundational types for the `shoal` flocking kernel.
//!
//! This crate is a dependency of every other `shoal-*` crate.  It has no
//! `shoal-*` dependencies and few external ones (`glam`, `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `KindId`, `SchoolId`                       |
//! | [`bounds`]      | `ArenaBounds` (center + half-extents)                 |
//! | [`force`]       | `falloff`, `guard`, `repulsion` force helpers         |
//! | [`params`]      | `SimulationParameters`                                |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `ShoalError`, `ShoalResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                                                     |
//! |---------|--------------------------------------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to configuration types. Required for JSON scenario files.  |

pub mod bounds;
pub mod error;
pub mod force;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bounds::ArenaBounds;
pub use error::{ShoalError, ShoalResult};
pub use ids::{AgentId, KindId, SchoolId};
pub use params::SimulationParameters;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};

/// The 2D vector type used throughout the workspace.
pub use glam::Vec2;
