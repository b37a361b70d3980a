//! Small force-math helpers shared by every kernel.

use glam::Vec2;

/// Aggregate force vectors with a squared magnitude at or below this are
/// treated as zero.
pub const GUARD_EPSILON_SQ: f32 = 0.001;

/// Unit vector along `v`, or zero when `|v|² <= GUARD_EPSILON_SQ`.
///
/// Every aggregate steering force goes through this before it is weighted,
/// so only its direction matters and near-zero sums stay zero.
#[inline]
pub fn guard(v: Vec2) -> Vec2 {
    if v.length_squared() > GUARD_EPSILON_SQ {
        v.normalize()
    } else {
        Vec2::ZERO
    }
}

/// Quadratic falloff: 1 at `d == 0`, 0 at `d >= radius`.
#[inline]
pub fn falloff(d: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    let t = (1.0 - d / radius).clamp(0.0, 1.0);
    t * t
}

/// Unit push from `other` towards `me`, scaled by [`falloff`].
///
/// Coincident points have no direction and contribute nothing.
#[inline]
pub fn repulsion(me: Vec2, other: Vec2, d: f32, radius: f32) -> Vec2 {
    (me - other).normalize_or_zero() * falloff(d, radius)
}
