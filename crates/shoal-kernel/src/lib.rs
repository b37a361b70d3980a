//! `shoal-kernel`: the per-tick kernels of the `shoal` flocking simulation.
//!
//! # Kernels
//!
//! | Kernel                   | Agents             | Writes              |
//! |--------------------------|--------------------|---------------------|
//! | [`FlockingKernel`]       | schooling, per kind | velocity           |
//! | [`InterSchoolKernel`]    | schooling           | velocity           |
//! | [`SoloKernel`]           | non-schooling       | velocity           |
//! | [`BoundaryKernel`]       | all                 | position, velocity |
//!
//! Every kernel reads neighbour positions and velocities from the settled
//! [`AgentStore`](shoal_agent::AgentStore) through a [`KernelContext`] and
//! writes into a separate output buffer, so an agent never observes another
//! agent's in-progress result.  The ordering between kernels is the caller's
//! job (see `shoal_sim::step`).
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs each pass on Rayon, `batch_size` agents per task. |

pub mod boundary;
pub mod context;
pub mod flocking;
pub mod inter_school;
pub mod pass;
pub mod solo;


pub use boundary::BoundaryKernel;
pub use context::{KernelContext, VelocityKernel};
pub use flocking::{FlockingForces, FlockingKernel};
pub use inter_school::InterSchoolKernel;
pub use pass::{run_integration, run_pass};
pub use solo::SoloKernel;
