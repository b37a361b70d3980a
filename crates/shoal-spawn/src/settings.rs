//! Spawn layout constants.

use shoal_core::{ShoalError, ShoalResult};

/// Tunables for [`SpawnPlanner`](crate::SpawnPlanner).  Defaults reproduce the
/// stock aquarium layout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnSettings {
    /// One cluster per this many schooling agents of a kind.
    pub agents_per_cluster: usize,
    /// Cap on clusters per kind.
    pub max_clusters: usize,
    /// Random cluster centers fall within `center ± cluster_spread · size`.
    pub cluster_spread: f32,
    /// Agent offset from its cluster center is uniform in this range.
    pub cluster_radius_min: f32,
    pub cluster_radius_max: f32,
    /// Heading jitter around the cluster heading (degrees).
    pub school_heading_jitter_deg: f32,
    /// Heading jitter around the kind heading for fixed spawns (degrees).
    pub fixed_heading_jitter_deg: f32,
    /// Random solo spawns fall within `center ± solo_spread · size`.
    pub solo_spread: f32,
    /// Fixed solo spawns fall within this radius of the spawn point.
    pub fixed_solo_radius: f32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            agents_per_cluster: 15,
            max_clusters: 3,
            cluster_spread: 0.35,
            cluster_radius_min: 0.3,
            cluster_radius_max: 1.5,
            school_heading_jitter_deg: 20.0,
            fixed_heading_jitter_deg: 45.0,
            solo_spread: 0.45,
            fixed_solo_radius: 0.5,
        }
    }
}

impl SpawnSettings {
    /// `clamp(count / agents_per_cluster, 1, max_clusters)`.
    pub fn cluster_count(&self, count: usize) -> usize {
        (count / self.agents_per_cluster.max(1)).clamp(1, self.max_clusters.max(1))
    }

    /// Reject layouts the planner cannot sample from.
    pub fn validate(&self) -> ShoalResult<()> {
        if self.agents_per_cluster == 0 || self.max_clusters == 0 {
            return Err(ShoalError::Config(
                "agents_per_cluster and max_clusters must be at least 1".into(),
            ));
        }
        let values = [
            self.cluster_spread,
            self.cluster_radius_min,
            self.cluster_radius_max,
            self.school_heading_jitter_deg,
            self.fixed_heading_jitter_deg,
            self.solo_spread,
            self.fixed_solo_radius,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ShoalError::Config(
                "spawn spreads, radii and jitters must be finite and non-negative".into(),
            ));
        }
        if self.cluster_radius_min > self.cluster_radius_max {
            return Err(ShoalError::Config(format!(
                "cluster_radius_min {} exceeds cluster_radius_max {}",
                self.cluster_radius_min, self.cluster_radius_max
            )));
        }
        Ok(())
    }
}
