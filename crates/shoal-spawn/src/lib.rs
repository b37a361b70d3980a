//! `shoal-spawn`: roster loading and spawn planning for `shoal`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`roster`]    | `KindSpec`, `Roster` (one entry per agent kind)             |
//! | [`loader`]    | `load_roster_csv`, `load_roster_reader`                     |
//! | [`settings`]  | `SpawnSettings` (cluster sizes, spreads, heading jitter)    |
//! | [`planner`]   | `SpawnPlanner`, `SpawnPlan`                                 |
//! | [`error`]     | `SpawnError`, `SpawnResult`                                 |
//!
//! # Usage
//!
//! ```rust,ignore
//! let roster = load_roster_csv(Path::new("roster.csv"))?;
//! let plan = SpawnPlanner::new(SpawnSettings::default())
//!     .bounds(bounds)
//!     .plan(&roster, &mut SimRng::new(seed))?;
//! let (store, rngs) = plan.into_store(seed)?;
//! ```

pub mod error;
pub mod loader;
pub mod planner;
pub mod roster;
pub mod settings;

#[cfg(test)]
mod tests;

pub use error::{SpawnError, SpawnResult};
pub use loader::{load_roster_csv, load_roster_reader};
pub use planner::{SpawnPlan, SpawnPlanner};
pub use roster::{KindSpec, Roster};
pub use settings::SpawnSettings;
