//! `shoal-agent`: Structure-of-Arrays agent storage for the `shoal` kernel.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`builder`]     | `AgentStoreBuilder`, `AgentInit` (validated construction) |
//!
//! Agents of one kind occupy a contiguous index range, so a kernel that only
//! cares about one kind iterates `store.kind_range(kind)` instead of
//! filtering the whole population.

pub mod builder;
pub mod store;


pub use builder::{AgentInit, AgentStoreBuilder};
pub use store::{AgentRngs, AgentStore};
