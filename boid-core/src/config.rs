#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::FlockError;

/// Neighbors farther apart than this never repel, whatever `range_repel` says.
pub const SEPARATION_SANITY_BOUND: f32 = 100.0;

/// Tuning shared by every boid in a flock.
///
/// Built once and only read while a step runs. Field names serialize in
/// camelCase (`rangeAttract`, `yMin`, ...) and missing fields take their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct FlockConfig {
    /// Neighbor radius for cohesion and alignment.
    pub range_attract: f32,
    /// Neighbor radius for separation.
    pub range_repel: f32,
    /// Accepted and validated, but alignment gathers neighbors within
    /// `range_attract`.
    pub range_align: f32,
    pub attract_factor: f32,
    pub repel_factor: f32,
    pub align_factor: f32,
    /// Cruise speed toward the local center of mass.
    pub attract_vmax: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            range_attract: 30.0,
            range_repel: 20.0,
            range_align: 5.0,
            attract_factor: 4.0,
            repel_factor: 2.0,
            align_factor: 2.0,
            attract_vmax: 5.0,
            min_speed: 10.0,
            max_speed: 50.0,
            y_min: 10.0,
            y_max: 50.0,
        }
    }
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), FlockError> {
        let values = [
            self.range_attract,
            self.range_repel,
            self.range_align,
            self.attract_factor,
            self.repel_factor,
            self.align_factor,
            self.attract_vmax,
            self.min_speed,
            self.max_speed,
            self.y_min,
            self.y_max,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FlockError::InvalidConfig("tuning values must be finite"));
        }
        if self.range_attract < 0.0 || self.range_repel < 0.0 || self.range_align < 0.0 {
            return Err(FlockError::InvalidConfig("neighbor radii must not be negative"));
        }
        if self.min_speed < 0.0 {
            return Err(FlockError::InvalidConfig("minimum speed must not be negative"));
        }
        if self.min_speed > self.max_speed {
            return Err(FlockError::InvalidConfig("minimum speed exceeds maximum speed"));
        }
        if self.y_min > self.y_max {
            return Err(FlockError::InvalidConfig("vertical band is inverted"));
        }
        Ok(())
    }
}
