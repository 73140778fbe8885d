#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! Flocking simulation core: boids steered by cohesion, alignment and
//! separation, advanced together one tick at a time.
//!
//! The crate holds only kinematic state. Drawing a boid, giving it a
//! collision proxy or replicating it over the network is left to the host,
//! which reads [`BoidSet::poses`] after each [`BoidSet::step`].

pub mod boid;
pub mod config;
pub mod error;
pub mod flock;
pub mod math;

pub use boid::Boid;
pub use config::{FlockConfig, SEPARATION_SANITY_BOUND};
pub use error::{ErrorKind, FlockError};
pub use flock::{BoidSet, PopulationState, SpawnRegion, DEFAULT_BOID_COUNT};
pub use math::{Axis, Quaternion, Vector3};
