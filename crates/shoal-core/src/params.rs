//! Tunable flocking parameters.

use crate::{ShoalError, ShoalResult};

/// Every weight, radius and limit the kernels read.
///
/// Read-only during a tick; a host may replace the whole struct between
/// ticks.  Defaults reproduce the stock aquarium tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParameters {
    pub cohesion_factor: f32,
    pub alignment_factor: f32,
    pub separation_factor: f32,
    pub schooling_radius: f32,
    pub separation_radius: f32,

    pub inter_school_avoidance_factor: f32,
    pub inter_school_avoidance_radius: f32,

    pub random_movement_factor: f32,
    pub avoidance_factor: f32,
    pub avoidance_radius: f32,

    pub boundary_force: f32,
    pub boundary_buffer: f32,

    /// Sprite turn rate.  Only used by renderers, see `shoal_sim::smooth_heading`.
    pub rotation_speed: f32,

    /// Minimum agents per parallel work item.
    pub batch_size: usize,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            cohesion_factor: 1.0,
            alignment_factor: 1.0,
            separation_factor: 1.0,
            schooling_radius: 5.0,
            separation_radius: 2.0,
            inter_school_avoidance_factor: 2.0,
            inter_school_avoidance_radius: 8.0,
            random_movement_factor: 1.0,
            avoidance_factor: 2.0,
            avoidance_radius: 3.0,
            boundary_force: 5.0,
            boundary_buffer: 3.0,
            rotation_speed: 3.0,
            batch_size: 32,
        }
    }
}

impl SimulationParameters {
    /// Reject non-finite values, negative radii and a zero batch size.
    pub fn validate(&self) -> ShoalResult<()> {
        let values = [
            ("cohesion_factor", self.cohesion_factor),
            ("alignment_factor", self.alignment_factor),
            ("separation_factor", self.separation_factor),
            ("schooling_radius", self.schooling_radius),
            ("separation_radius", self.separation_radius),
            ("inter_school_avoidance_factor", self.inter_school_avoidance_factor),
            ("inter_school_avoidance_radius", self.inter_school_avoidance_radius),
            ("random_movement_factor", self.random_movement_factor),
            ("avoidance_factor", self.avoidance_factor),
            ("avoidance_radius", self.avoidance_radius),
            ("boundary_force", self.boundary_force),
            ("boundary_buffer", self.boundary_buffer),
            ("rotation_speed", self.rotation_speed),
        ];
        for (name, v) in values {
            if !v.is_finite() {
                return Err(ShoalError::Config(format!("{name} must be finite, got {v}")));
            }
        }

        let distances = [
            ("schooling_radius", self.schooling_radius),
            ("separation_radius", self.separation_radius),
            ("inter_school_avoidance_radius", self.inter_school_avoidance_radius),
            ("avoidance_radius", self.avoidance_radius),
            ("boundary_buffer", self.boundary_buffer),
        ];
        for (name, v) in distances {
            if v < 0.0 {
                return Err(ShoalError::Config(format!("{name} must not be negative, got {v}")));
            }
        }

        if self.batch_size == 0 {
            return Err(ShoalError::Config("batch_size must be at least 1".into()));
        }
        Ok(())
    }
}
