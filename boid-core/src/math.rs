#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

pub(crate) fn abs(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.abs()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::fabsf(value)
    }
}

pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        (libm::sinf(angle), libm::cosf(angle))
    }
}

fn infinite_sign(value: f32) -> f32 {
    if value == f32::INFINITY {
        1.0
    } else if value == f32::NEG_INFINITY {
        -1.0
    } else {
        0.0
    }
}

/// One of the three world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// A 3D vector used for position, velocity and force
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// Reference axis a boid model faces when its orientation is identity.
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Largest absolute component.
    fn max_abs(&self) -> f32 {
        abs(self.x).max(abs(self.y)).max(abs(self.z))
    }

    /// Length of the vector. Components are divided by the largest one
    /// before squaring, so finite vectors far beyond `sqrt(f32::MAX)` still
    /// get a finite length.
    pub fn magnitude(&self) -> f32 {
        if self.x.is_nan() || self.y.is_nan() || self.z.is_nan() {
            return f32::NAN;
        }
        let scale = self.max_abs();
        if scale == 0.0 || !scale.is_finite() {
            return scale;
        }
        scale * sqrt((*self / scale).magnitude_squared())
    }

    /// Unit vector in the same direction. A zero-length or NaN vector becomes
    /// zero. Infinite components point the way their sign does.
    pub fn normalize(&self) -> Self {
        if self.x.is_nan() || self.y.is_nan() || self.z.is_nan() {
            return Self::zero();
        }
        let scale = self.max_abs();
        if scale == 0.0 {
            return Self::zero();
        }
        let boxed = if scale.is_finite() {
            *self / scale
        } else {
            Self::new(
                infinite_sign(self.x),
                infinite_sign(self.y),
                infinite_sign(self.z),
            )
        };
        boxed / sqrt(boxed.magnitude_squared())
    }

    pub fn distance(&self, other: &Vector3) -> f32 {
        (*self - *other).magnitude()
    }

    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Rescales the vector so its magnitude lies in `[min, max]`, keeping its
    /// direction. A zero or NaN vector has no direction and becomes
    /// `FORWARD * min`.
    pub fn clamp_magnitude(&self, min: f32, max: f32) -> Self {
        let mag = self.magnitude();
        if !(mag > 0.0) {
            Self::FORWARD * min
        } else if mag < min {
            self.normalize() * min
        } else if mag > max {
            self.normalize() * max
        } else {
            *self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl core::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl core::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl core::ops::Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl core::ops::Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl core::ops::SubAssign for Vector3 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

/// Unit quaternion describing a boid's facing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub const fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotation of `angle` radians about `axis`. The axis need not be unit length.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let axis = axis.normalize();
        let (sin, cos) = sin_cos(angle * 0.5);
        Self {
            w: cos,
            x: axis.x * sin,
            y: axis.y * sin,
            z: axis.z * sin,
        }
    }

    /// Shortest rotation carrying direction `from` onto direction `to`.
    ///
    /// Opposite directions have no unique shortest arc; those turn half a
    /// revolution about the part of `UP` perpendicular to `from` (a plain yaw
    /// for horizontal headings). Zero-length inputs yield identity.
    pub fn from_rotation_arc(from: Vector3, to: Vector3) -> Self {
        let from = from.normalize();
        let to = to.normalize();
        if from == Vector3::zero() || to == Vector3::zero() {
            return Self::identity();
        }

        let d = from.dot(&to);
        if d < -1.0 + 1.0e-6 {
            let mut axis = Vector3::UP - from * from.dot(&Vector3::UP);
            if axis.magnitude_squared() < 1.0e-6 {
                let right = Vector3::new(1.0, 0.0, 0.0);
                axis = right - from * from.dot(&right);
            }
            return Self::from_axis_angle(axis, core::f32::consts::PI);
        }

        let c = from.cross(&to);
        Self {
            w: 1.0 + d,
            x: c.x,
            y: c.y,
            z: c.z,
        }
        .normalize()
    }

    pub fn normalize(&self) -> Self {
        let len = sqrt(self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z);
        if len > 0.0 {
            Self {
                w: self.w / len,
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::identity()
        }
    }

    /// Applies this rotation to `v`.
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        let q = Vector3::new(self.x, self.y, self.z);
        let t = q.cross(&v) * 2.0;
        v + t * self.w + q.cross(&t)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3, b: Vector3) {
        assert!(
            a.distance(&b) < 1.0e-5,
            "expected {:?} to be close to {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_vector3_magnitude() {
        let v = Vector3::new(2.0, 3.0, 6.0);
        assert!((v.magnitude() - 7.0).abs() < 1.0e-5);
        assert_eq!(Vector3::new(0.0, -4.0, 0.0).magnitude(), 4.0);
    }

    #[test]
    fn test_magnitude_of_huge_vector_is_finite() {
        let v = Vector3::new(1.0e20, 0.0, 0.0);
        assert!(v.magnitude_squared().is_infinite());
        assert!((v.magnitude() / 1.0e20 - 1.0).abs() < 1.0e-6);
        assert_close(v.normalize(), Vector3::new(1.0, 0.0, 0.0));

        let diagonal = Vector3::new(-3.0e38, 0.0, 3.0e38).normalize();
        assert_close(diagonal, Vector3::new(-1.0, 0.0, 1.0).normalize());
    }

    #[test]
    fn test_normalize_infinite_keeps_sign() {
        let n = Vector3::new(f32::NEG_INFINITY, 2.0, 0.0).normalize();
        assert_eq!(n, Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(Vector3::new(f32::NAN, 1.0, 0.0).normalize(), Vector3::zero());
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        let n = Vector3::zero().normalize();
        assert_eq!(n, Vector3::zero());
        assert!(n.is_finite());
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(x.cross(&Vector3::UP), Vector3::FORWARD);
    }

    #[test]
    fn test_clamp_magnitude_of_huge_vector() {
        let clamped = Vector3::new(1.0e20, 0.0, 0.0).clamp_magnitude(10.0, 50.0);
        assert_close(clamped, Vector3::new(50.0, 0.0, 0.0));

        let clamped = Vector3::new(3.0e38, 3.0e38, 0.0).clamp_magnitude(10.0, 50.0);
        assert!((clamped.magnitude() - 50.0).abs() < 1.0e-4);
        assert!(clamped.x > 0.0 && clamped.y > 0.0);

        let clamped = Vector3::new(0.0, f32::INFINITY, 0.0).clamp_magnitude(10.0, 50.0);
        assert_eq!(clamped, Vector3::new(0.0, 50.0, 0.0));
    }

    #[test]
    fn test_clamp_magnitude() {
        let slow = Vector3::new(0.0, 3.0, 4.0).clamp_magnitude(10.0, 50.0);
        assert!((slow.magnitude() - 10.0).abs() < 1.0e-4);
        assert_close(slow.normalize(), Vector3::new(0.0, 0.6, 0.8));

        let fast = Vector3::new(100.0, 0.0, 0.0).clamp_magnitude(10.0, 50.0);
        assert_close(fast, Vector3::new(50.0, 0.0, 0.0));

        let ok = Vector3::new(20.0, 0.0, 0.0);
        assert_eq!(ok.clamp_magnitude(10.0, 50.0), ok);

        let still = Vector3::zero().clamp_magnitude(10.0, 50.0);
        assert_eq!(still, Vector3::FORWARD * 10.0);
    }

    #[test]
    fn test_rotation_arc_maps_from_onto_to() {
        let targets = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, -2.0, 3.0).normalize(),
            Vector3::FORWARD,
        ];

        for to in targets {
            let q = Quaternion::from_rotation_arc(Vector3::FORWARD, to);
            assert_close(q.rotate(Vector3::FORWARD), to);
        }
    }

    #[test]
    fn test_rotation_arc_opposite_turns_about_up() {
        let q = Quaternion::from_rotation_arc(Vector3::FORWARD, -Vector3::FORWARD);
        assert_close(q.rotate(Vector3::FORWARD), -Vector3::FORWARD);
        // Half turn about UP leaves UP fixed.
        assert_close(q.rotate(Vector3::UP), Vector3::UP);
    }

    #[test]
    fn test_rotation_arc_zero_is_identity() {
        let q = Quaternion::from_rotation_arc(Vector3::FORWARD, Vector3::zero());
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn test_axis_angle_quarter_turn() {
        let q = Quaternion::from_axis_angle(Vector3::UP, core::f32::consts::FRAC_PI_2);
        assert_close(q.rotate(Vector3::FORWARD), Vector3::new(1.0, 0.0, 0.0));
    }
}
