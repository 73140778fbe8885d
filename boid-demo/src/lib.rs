//! Headless host for the flock: owns the population and the frame clock,
//! and turns each tick into poses a renderer could consume.

use std::path::Path;

use anyhow::{Context, Result};
use boid_core::{BoidSet, Vector3, DEFAULT_BOID_COUNT};
use boid_shared::{FlockStatus, FrameReport, SceneSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Squared distance below which a player ball counts as touching a boid.
pub const DEFAULT_CONTACT_RANGE_SQUARED: f32 = 30.0;

pub struct Host<const N: usize = DEFAULT_BOID_COUNT> {
    flock: BoidSet<N>,
    delta_time: f32,
    tick: u64,
    seed: u64,
}

impl<const N: usize> Host<N> {
    pub fn from_settings(settings: &SceneSettings) -> Result<Self> {
        anyhow::ensure!(
            settings.delta_time.is_finite() && settings.delta_time >= 0.0,
            "frame delta must be a non-negative number, got {}",
            settings.delta_time
        );

        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut flock = BoidSet::new(settings.flock).context("invalid flock settings")?;
        let mut rng = StdRng::seed_from_u64(seed);
        flock
            .initialize(&settings.spawn, &mut rng)
            .context("failed to spawn flock")?;

        log::info!("Spawned {} boids (seed {})", N, seed);

        Ok(Self {
            flock,
            delta_time: settings.delta_time,
            tick: 0,
            seed,
        })
    }

    /// Advances the flock by one frame.
    pub fn tick(&mut self) -> Result<()> {
        self.flock
            .step(self.delta_time)
            .with_context(|| format!("step {} failed", self.tick + 1))?;
        self.tick += 1;
        Ok(())
    }

    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        log::debug!("Ran {} ticks, now at tick {}", ticks, self.tick);
        Ok(())
    }

    pub fn status(&self) -> FlockStatus {
        FlockStatus::measure(self.tick, &self.flock)
    }

    pub fn frame(&self) -> FrameReport {
        FrameReport::capture(self.tick, &self.flock)
    }

    pub fn contacts(&self, point: Vector3, range_squared: f32) -> Vec<usize> {
        self.flock.contacts(point, range_squared).collect()
    }

    pub fn flock(&self) -> &BoidSet<N> {
        &self.flock
    }

    pub fn ticks_elapsed(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Reads scene settings from a JSON file, or returns the defaults when no
/// path is given.
pub fn load_settings(path: Option<&Path>) -> Result<SceneSettings> {
    let Some(path) = path else {
        return Ok(SceneSettings::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    SceneSettings::from_json(&json)
        .with_context(|| format!("Failed to parse settings in {}", path.display()))
}

/// Parses an `x,y,z` triple.
pub fn parse_point(s: &str) -> Result<Vector3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid coordinate in '{}': {}", s, e))?;

    match parts[..] {
        [x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(format!("expected x,y,z but got '{}'", s)),
    }
}
