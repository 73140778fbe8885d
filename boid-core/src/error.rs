use crate::math::Axis;

/// Broad category of a [`FlockError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The population is not in a state that allows the call.
    InvalidState,
    /// An input value was rejected.
    InvalidArgument,
}

/// Errors returned by flock construction, spawning and stepping.
///
/// None of these leave the population in a modified state: a refused call
/// can be retried with corrected input.
#[derive(Debug, Clone, PartialEq)]
pub enum FlockError {
    /// `step` was called before the population was initialized.
    NotInitialized,
    /// The spawn volume has `min > max`, a non-finite bound, or a span too
    /// wide to sample on an axis.
    DegenerateSpawnRegion { axis: Axis, min: f32, max: f32 },
    /// The initial speed range is negative, inverted or too wide to sample.
    InvalidSpeedRange { min: f32, max: f32 },
    /// The frame delta was negative or not finite.
    InvalidTimeStep(f32),
    /// A snapshot did not hold exactly the population capacity.
    PopulationSize { expected: usize, actual: usize },
    /// A tuning value is out of range.
    InvalidConfig(&'static str),
}

impl FlockError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlockError::NotInitialized => ErrorKind::InvalidState,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl core::fmt::Display for FlockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FlockError::NotInitialized => write!(f, "flock has not been initialized"),
            FlockError::DegenerateSpawnRegion { axis, min, max } => write!(
                f,
                "spawn region is degenerate on the {} axis ({}..{})",
                axis, min, max
            ),
            FlockError::InvalidSpeedRange { min, max } => {
                write!(f, "invalid initial speed range {}..{}", min, max)
            }
            FlockError::InvalidTimeStep(dt) => write!(f, "invalid time step {}", dt),
            FlockError::PopulationSize { expected, actual } => write!(
                f,
                "expected exactly {} boids, got {}",
                expected, actual
            ),
            FlockError::InvalidConfig(reason) => write!(f, "invalid flock config: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FlockError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(FlockError::NotInitialized.kind(), ErrorKind::InvalidState);
        assert_eq!(
            FlockError::DegenerateSpawnRegion {
                axis: Axis::Y,
                min: 1.0,
                max: 0.0
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            FlockError::InvalidTimeStep(-1.0).kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_display_names_axis() {
        let err = FlockError::DegenerateSpawnRegion {
            axis: Axis::Z,
            min: 5.0,
            max: -5.0,
        };
        let message = err.to_string();
        assert!(message.contains("z axis"), "{}", message);
    }
}
