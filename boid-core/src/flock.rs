//! The fixed-size population and its per-tick update.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::error::FlockError;
use crate::math::{sin_cos, Axis, Quaternion, Vector3};

/// Number of boids in a flock unless a capacity is given.
pub const DEFAULT_BOID_COUNT: usize = 60;

/// Box boids are spawned in, and the speed range of their first velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct SpawnRegion {
    pub min: Vector3,
    pub max: Vector3,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self {
            min: Vector3::new(-90.0, 0.0, -90.0),
            max: Vector3::new(90.0, 180.0, 90.0),
            min_speed: 20.0,
            max_speed: 40.0,
        }
    }
}

/// Uniform float sampling divides the span by a factor just below one, so a
/// span near `f32::MAX` still overflows. Half the range leaves ample room.
fn samplable_span(min: f32, max: f32) -> bool {
    (max - min) <= f32::MAX / 2.0
}

impl SpawnRegion {
    pub fn new(min: Vector3, max: Vector3, min_speed: f32, max_speed: f32) -> Self {
        Self {
            min,
            max,
            min_speed,
            max_speed,
        }
    }

    /// Checks that every axis and the speed range are ordered, finite, and
    /// narrow enough for their span to be sampled without overflowing.
    pub fn validate(&self) -> Result<(), FlockError> {
        for axis in Axis::ALL {
            let (min, max) = (self.min.axis(axis), self.max.axis(axis));
            if !(min.is_finite() && max.is_finite() && min <= max && samplable_span(min, max)) {
                return Err(FlockError::DegenerateSpawnRegion { axis, min, max });
            }
        }
        if !(self.max_speed.is_finite()
            && self.min_speed >= 0.0
            && self.min_speed <= self.max_speed
            && samplable_span(self.min_speed, self.max_speed))
        {
            return Err(FlockError::InvalidSpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        Ok(())
    }

    pub fn contains(&self, point: Vector3) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let v = point.axis(axis);
            v >= self.min.axis(axis) && v <= self.max.axis(axis)
        })
    }

    /// Draws one boid: uniform position in the box, horizontal heading in a
    /// uniformly random direction, speed uniform in the speed range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Boid {
        let position = Vector3::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
            rng.gen_range(self.min.z..=self.max.z),
        );

        let (sin, cos) = sin_cos(rng.gen_range(0.0..core::f32::consts::TAU));
        let speed = rng.gen_range(self.min_speed..=self.max_speed);
        let velocity = Vector3::new(cos, 0.0, sin) * speed;

        Boid::new(position, velocity)
    }
}

/// Lifecycle of a [`BoidSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationState {
    Uninitialized,
    Ready,
}

/// A flock of exactly `N` boids sharing one [`FlockConfig`]
#[derive(Debug, Clone)]
pub struct BoidSet<const N: usize = DEFAULT_BOID_COUNT> {
    boids: heapless::Vec<Boid, N>,
    config: FlockConfig,
    state: PopulationState,
}

impl<const N: usize> BoidSet<N> {
    /// An empty, uninitialized flock. Fails if `config` does not validate.
    pub fn new(config: FlockConfig) -> Result<Self, FlockError> {
        config.validate()?;
        Ok(Self {
            boids: heapless::Vec::new(),
            config,
            state: PopulationState::Uninitialized,
        })
    }

    /// A ready flock from an explicit set of boids, e.g. a saved snapshot.
    pub fn from_boids<I>(config: FlockConfig, boids: I) -> Result<Self, FlockError>
    where
        I: IntoIterator<Item = Boid>,
    {
        config.validate()?;

        let mut set = heapless::Vec::new();
        let mut actual = 0;
        for boid in boids {
            actual += 1;
            // Overflow is reported below with the full count.
            let _ = set.push(boid);
        }
        if actual != N {
            return Err(FlockError::PopulationSize {
                expected: N,
                actual,
            });
        }

        Ok(Self {
            boids: set,
            config,
            state: PopulationState::Ready,
        })
    }

    /// Spawns all `N` boids inside `region`, replacing any existing ones.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        region: &SpawnRegion,
        rng: &mut R,
    ) -> Result<(), FlockError> {
        region.validate()?;

        self.boids.clear();
        for _ in 0..N {
            // Cleared above and pushed exactly N times, so this never overflows.
            let _ = self.boids.push(region.sample(rng));
        }
        self.state = PopulationState::Ready;

        log::debug!("spawned {} boids in {:?}", N, region);
        Ok(())
    }

    #[cfg(feature = "std")]
    pub fn initialize_random(&mut self, region: &SpawnRegion) -> Result<(), FlockError> {
        self.initialize(region, &mut rand::thread_rng())
    }

    /// Advances every boid by `delta_time`.
    ///
    /// All forces are computed against the flock as it stood at the start of
    /// the call before any boid moves, so the outcome does not depend on the
    /// order boids are stored in.
    pub fn step(&mut self, delta_time: f32) -> Result<(), FlockError> {
        if self.state != PopulationState::Ready {
            log::warn!("refusing to step a flock that has not been initialized");
            return Err(FlockError::NotInitialized);
        }
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("refusing to step with time delta {}", delta_time);
            return Err(FlockError::InvalidTimeStep(delta_time));
        }

        let snapshot = self.boids.clone();
        for (index, boid) in self.boids.iter_mut().enumerate() {
            boid.compute_force(index, &snapshot, &self.config);
        }
        for boid in self.boids.iter_mut() {
            boid.update(delta_time, &self.config);
        }

        log::trace!("stepped {} boids by {}s", self.boids.len(), delta_time);
        Ok(())
    }

    /// Replaces the tuning between steps.
    pub fn set_config(&mut self, config: FlockConfig) -> Result<(), FlockError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn state(&self) -> PopulationState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == PopulationState::Ready
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Position and orientation of every boid, for placing their visuals.
    pub fn poses(&self) -> impl Iterator<Item = (Vector3, Quaternion)> + '_ {
        self.boids.iter().map(|b| (b.position, b.orientation))
    }

    /// Position and facing direction of every boid, for debug heading lines.
    pub fn headings(&self) -> impl Iterator<Item = (Vector3, Vector3)> + '_ {
        self.boids.iter().map(|b| (b.position, b.heading()))
    }

    /// Indices of boids whose squared distance to `point` is strictly below
    /// `range_squared`.
    pub fn contacts(
        &self,
        point: Vector3,
        range_squared: f32,
    ) -> impl Iterator<Item = usize> + '_ {
        self.boids
            .iter()
            .enumerate()
            .filter(move |(_, b)| (b.position - point).magnitude_squared() < range_squared)
            .map(|(index, _)| index)
    }
}
