#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use boid_core::{BoidSet, FlockConfig, Quaternion, SpawnRegion, Vector3};
use serde::{Deserialize, Serialize};

/// Scene setup handed to the simulation by the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneSettings {
    pub flock: FlockConfig,
    pub spawn: SpawnRegion,
    /// Fixed frame delta in seconds
    pub delta_time: f32,
    /// Spawn seed; `None` draws a fresh one
    pub seed: Option<u64>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            flock: FlockConfig::default(),
            spawn: SpawnRegion::default(),
            delta_time: 1.0 / 60.0,
            seed: None,
        }
    }
}

#[cfg(feature = "std")]
impl SceneSettings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Where to place one boid's visual this frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentPose {
    pub position: Vector3,
    pub orientation: Quaternion,
}

impl AgentPose {
    pub fn new(position: Vector3, orientation: Quaternion) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Facing direction, the line the debug overlay draws from `position`
    pub fn heading(&self) -> Vector3 {
        self.orientation.rotate(Vector3::FORWARD)
    }
}

/// Every boid's pose after a tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameReport {
    pub tick: u64,
    pub poses: Vec<AgentPose>,
}

impl FrameReport {
    pub fn capture<const N: usize>(tick: u64, flock: &BoidSet<N>) -> Self {
        Self {
            tick,
            poses: flock
                .poses()
                .map(|(position, orientation)| AgentPose::new(position, orientation))
                .collect(),
        }
    }
}

/// One-line summary of the flock, for status logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlockStatus {
    pub boid_count: usize,
    pub tick: u64,
    pub mean_speed: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl FlockStatus {
    pub fn measure<const N: usize>(tick: u64, flock: &BoidSet<N>) -> Self {
        let boids = flock.boids();
        if boids.is_empty() {
            return Self {
                boid_count: 0,
                tick,
                mean_speed: 0.0,
                min_y: 0.0,
                max_y: 0.0,
            };
        }

        let mut speed_sum = 0.0;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for boid in boids {
            speed_sum += boid.velocity.magnitude();
            min_y = min_y.min(boid.position.y);
            max_y = max_y.max(boid.position.y);
        }

        Self {
            boid_count: boids.len(),
            tick,
            mean_speed: speed_sum / boids.len() as f32,
            min_y,
            max_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boid_core::Boid;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let json = r#"{ "flock": { "rangeAttract": 40.0, "yMax": 80.0 }, "seed": 3 }"#;
        let settings = SceneSettings::from_json(json).unwrap();

        assert_eq!(settings.flock.range_attract, 40.0);
        assert_eq!(settings.flock.y_max, 80.0);
        assert_eq!(settings.flock.range_repel, FlockConfig::default().range_repel);
        assert_eq!(settings.spawn, SpawnRegion::default());
        assert_eq!(settings.seed, Some(3));
    }

    #[test]
    fn test_settings_use_camel_case_names() {
        let json = SceneSettings::default().to_json_pretty().unwrap();

        for key in ["rangeAttract", "rangeRepel", "rangeAlign", "attractVmax", "yMin", "deltaTime"] {
            assert!(json.contains(key), "missing {} in {}", key, json);
        }
    }

    #[test]
    fn test_frame_report_captures_every_boid() {
        let boids = [
            Boid::new(Vector3::new(0.0, 20.0, 0.0), Vector3::new(10.0, 0.0, 0.0)),
            Boid::new(Vector3::new(5.0, 25.0, 0.0), Vector3::new(0.0, 0.0, 10.0)),
        ];
        let flock = BoidSet::<2>::from_boids(FlockConfig::default(), boids).unwrap();

        let frame = FrameReport::capture(4, &flock);
        assert_eq!(frame.tick, 4);
        assert_eq!(frame.poses.len(), 2);
        assert_eq!(frame.poses[1].position, Vector3::new(5.0, 25.0, 0.0));
        assert!(frame.poses[0].heading().distance(&Vector3::new(1.0, 0.0, 0.0)) < 1.0e-5);
    }

    #[test]
    fn test_status_summary() {
        let boids = [
            Boid::new(Vector3::new(0.0, 20.0, 0.0), Vector3::new(10.0, 0.0, 0.0)),
            Boid::new(Vector3::new(5.0, 30.0, 0.0), Vector3::new(0.0, 0.0, 30.0)),
        ];
        let flock = BoidSet::<2>::from_boids(FlockConfig::default(), boids).unwrap();

        let status = FlockStatus::measure(9, &flock);
        assert_eq!(status.boid_count, 2);
        assert_eq!(status.mean_speed, 20.0);
        assert_eq!(status.min_y, 20.0);
        assert_eq!(status.max_y, 30.0);
    }
}
