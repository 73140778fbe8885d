//! A single flocking agent and its three steering rules.
//!
//! Every rule takes the whole flock as a slice plus the agent's own index in
//! it. The index is the agent's identity: two boids may share a position and
//! velocity exactly, so skipping "self" by value would drop a real neighbor.

use crate::config::{FlockConfig, SEPARATION_SANITY_BOUND};
use crate::math::{Quaternion, Vector3};

/// A single boid
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector3,
    pub velocity: Vector3,
    /// Facing derived from `velocity` on every update. Never read by the rules.
    pub orientation: Quaternion,
    /// Steering accumulated for the current tick, cleared by `update`.
    pub force: Vector3,
}

fn neighbors(own_index: usize, flock: &[Boid]) -> impl Iterator<Item = &Boid> {
    flock
        .iter()
        .enumerate()
        .filter(move |&(index, _)| index != own_index)
        .map(|(_, boid)| boid)
}

impl Boid {
    pub fn new(position: Vector3, velocity: Vector3) -> Self {
        Self {
            position,
            velocity,
            orientation: Quaternion::from_rotation_arc(Vector3::FORWARD, velocity),
            force: Vector3::zero(),
        }
    }

    /// Cohesion: steer toward the center of mass of neighbors within
    /// `range_attract` at `attract_vmax`.
    pub fn attraction(&self, own_index: usize, flock: &[Boid], config: &FlockConfig) -> Vector3 {
        let mut center = Vector3::zero();
        let mut count = 0;

        for other in neighbors(own_index, flock) {
            if self.position.distance(&other.position) < config.range_attract {
                center += other.position;
                count += 1;
            }
        }

        if count == 0 {
            return Vector3::zero();
        }

        center = center / count as f32;
        let desired = (center - self.position).normalize() * config.attract_vmax;
        (desired - self.velocity) * config.attract_factor
    }

    /// Alignment: steer toward the mean heading of neighbors within
    /// `range_attract`, scaled by `align_factor`.
    pub fn alignment(&self, own_index: usize, flock: &[Boid], config: &FlockConfig) -> Vector3 {
        let mut sum = Vector3::zero();
        let mut count = 0;

        for other in neighbors(own_index, flock) {
            if self.position.distance(&other.position) < config.range_attract {
                sum += other.velocity;
                count += 1;
            }
        }

        if count == 0 {
            return Vector3::zero();
        }

        let heading = (sum / count as f32).normalize() * config.align_factor;
        heading - self.velocity
    }

    /// Separation: a unit push of `repel_factor` away from each neighbor
    /// closer than `range_repel`. Coincident neighbors are skipped.
    pub fn separation(&self, own_index: usize, flock: &[Boid], config: &FlockConfig) -> Vector3 {
        let mut steering = Vector3::zero();

        for other in neighbors(own_index, flock) {
            let offset = self.position - other.position;
            let distance = offset.magnitude();
            if distance < config.range_repel && distance > 0.0 && distance < SEPARATION_SANITY_BOUND
            {
                steering += offset.normalize() * config.repel_factor;
            }
        }

        steering
    }

    pub fn compute_attraction(&mut self, own_index: usize, flock: &[Boid], config: &FlockConfig) {
        let force = self.attraction(own_index, flock, config);
        self.force += force;
    }

    pub fn compute_alignment(&mut self, own_index: usize, flock: &[Boid], config: &FlockConfig) {
        let force = self.alignment(own_index, flock, config);
        self.force += force;
    }

    pub fn compute_separation(&mut self, own_index: usize, flock: &[Boid], config: &FlockConfig) {
        let force = self.separation(own_index, flock, config);
        self.force += force;
    }

    /// Recomputes `force` from scratch against `flock`, a snapshot in which
    /// this boid sits at `own_index`.
    pub fn compute_force(&mut self, own_index: usize, flock: &[Boid], config: &FlockConfig) {
        self.force = Vector3::zero();
        self.compute_attraction(own_index, flock, config);
        self.compute_alignment(own_index, flock, config);
        self.compute_separation(own_index, flock, config);
    }

    /// Integrates one tick of unit-mass motion under the accumulated force.
    ///
    /// Speed ends up in `[min_speed, max_speed]` and height in
    /// `[y_min, y_max]`; the force is consumed.
    pub fn update(&mut self, delta_time: f32, config: &FlockConfig) {
        self.velocity += self.force * delta_time;
        self.velocity = self
            .velocity
            .clamp_magnitude(config.min_speed, config.max_speed);

        self.position += self.velocity * delta_time;
        self.orientation =
            Quaternion::from_rotation_arc(Vector3::FORWARD, self.velocity.normalize());
        self.position.y = self.position.y.clamp(config.y_min, config.y_max);

        self.force = Vector3::zero();
    }

    /// Direction the boid faces, for drawing heading lines.
    pub fn heading(&self) -> Vector3 {
        self.orientation.rotate(Vector3::FORWARD)
    }
}
