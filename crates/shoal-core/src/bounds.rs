//! Arena geometry.

use glam::Vec2;

use crate::{ShoalError, ShoalResult};

/// Axis-aligned rectangular arena, stored as center and half-extents.
///
/// Constructed once per run and never changed.  Every agent position is kept
/// inside `[min(), max()]` (inclusive) after each tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaBounds {
    center: Vec2,
    half_extents: Vec2,
}

impl ArenaBounds {
    /// Build from a center and half-extents.  Both half-extents must be
    /// finite and strictly positive.
    pub fn new(center: Vec2, half_extents: Vec2) -> ShoalResult<Self> {
        if !center.is_finite() {
            return Err(ShoalError::Config(format!(
                "arena center must be finite, got {center}"
            )));
        }
        if !half_extents.is_finite() || half_extents.x <= 0.0 || half_extents.y <= 0.0 {
            return Err(ShoalError::Config(format!(
                "arena half-extents must be finite and positive, got {half_extents}"
            )));
        }
        Ok(Self { center, half_extents })
    }

    /// Build from a center and the full width/height.
    pub fn from_size(center: Vec2, size: Vec2) -> ShoalResult<Self> {
        Self::new(center, size * 0.5)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let rel = (p - self.center).abs();
        rel.x <= self.half_extents.x && rel.y <= self.half_extents.y
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

impl Default for ArenaBounds {
    /// 20 x 15 arena centred on the origin.
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            half_extents: Vec2::new(10.0, 7.5),
        }
    }
}
