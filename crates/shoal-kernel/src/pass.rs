//! Pass drivers: run one kernel over an index range.
//!
//! Each driver walks the output slots of a range together with the matching
//! per-agent RNGs.  With the `parallel` feature the walk is split into Rayon
//! tasks of at least `batch_size` agents; without it the same closure runs
//! in index order.  An agent's result depends only on the settled store and
//! its own RNG, so both builds produce identical buffers.

use std::ops::Range;

use shoal_agent::AgentRngs;
use shoal_core::{AgentId, AgentRng, Vec2};

use crate::{BoundaryKernel, KernelContext, VelocityKernel};

/// Run `kernel` over `range`, reading stage velocities from `input` and
/// writing `output[range]`.  Agents the kernel does not apply to get their
/// input velocity copied through.  Slots outside `range` are untouched.
///
/// # Panics
/// Panics if `range` exceeds either buffer or the RNG array.
pub fn run_pass<K: VelocityKernel>(
    kernel: &K,
    ctx: &KernelContext<'_>,
    range: Range<usize>,
    input: &[Vec2],
    output: &mut [Vec2],
    rngs: &mut AgentRngs,
) {
    let base = range.start;
    let input = &input[range.clone()];
    let output = &mut output[range.clone()];
    let rngs = rngs.range_mut(range);

    let step = |i: usize, v: Vec2, rng: &mut AgentRng| {
        let agent = AgentId((base + i) as u32);
        if kernel.applies_to(agent, ctx) {
            kernel.steer(agent, v, ctx, rng)
        } else {
            v
        }
    };

    #[cfg(not(feature = "parallel"))]
    {
        for (i, ((out, &v), rng)) in output.iter_mut().zip(input).zip(rngs).enumerate() {
            *out = step(i, v, rng);
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        output
            .par_iter_mut()
            .zip(input.par_iter())
            .zip(rngs.par_iter_mut())
            .enumerate()
            .with_min_len(ctx.params.batch_size.max(1))
            .for_each(|(i, ((out, &v), rng))| *out = step(i, v, rng));
    }
}

/// Run [`BoundaryKernel::integrate`] for every agent, writing the end-of-tick
/// positions and velocities into `positions_out` / `velocities_out`.
///
/// # Panics
/// Panics if any buffer is shorter than the agent count.
pub fn run_integration(
    ctx: &KernelContext<'_>,
    velocities: &[Vec2],
    positions_out: &mut [Vec2],
    velocities_out: &mut [Vec2],
    rngs: &mut AgentRngs,
) {
    let n = ctx.agents.count();
    let velocities = &velocities[..n];
    let positions_out = &mut positions_out[..n];
    let velocities_out = &mut velocities_out[..n];
    let rngs = rngs.range_mut(0..n);

    #[cfg(not(feature = "parallel"))]
    {
        let slots = positions_out.iter_mut().zip(velocities_out.iter_mut());
        for (i, (((p_out, v_out), &v), rng)) in slots.zip(velocities).zip(rngs).enumerate() {
            (*p_out, *v_out) = BoundaryKernel::integrate(AgentId(i as u32), v, ctx, rng);
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        positions_out
            .par_iter_mut()
            .zip(velocities_out.par_iter_mut())
            .zip(velocities.par_iter())
            .zip(rngs.par_iter_mut())
            .enumerate()
            .with_min_len(ctx.params.batch_size.max(1))
            .for_each(|(i, (((p_out, v_out), &v), rng))| {
                (*p_out, *v_out) = BoundaryKernel::integrate(AgentId(i as u32), v, ctx, rng);
            });
    }
}
