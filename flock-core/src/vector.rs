use crate::error::{Error, Result};

/// A 2D vector used for position, velocity and steering forces.
///
/// Every operation returns a new vector; nothing mutates in place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn subtract(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn scale(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    /// Divides both components by `scalar`.
    ///
    /// A zero divisor is a caller bug (typically an average over zero
    /// neighbors) and is reported as [`Error::InvalidOperation`].
    pub fn divide(self, scalar: f32) -> Result<Self> {
        if scalar == 0.0 || scalar.is_nan() {
            return Err(Error::InvalidOperation("division of a vector by zero"));
        }
        Ok(Self {
            x: self.x / scalar,
            y: self.y / scalar,
        })
    }

    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Unit vector with the same direction. The zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Scales the vector down to `max` if it is longer, otherwise returns it unchanged.
    pub fn limit(&self, max: f32) -> Self {
        let mag = self.magnitude();
        if mag > max {
            self.normalize().scale(max)
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        self.subtract(*other).magnitude()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector2D::add(self, other)
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        self.scale(scalar)
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl core::iter::Sum for Vector2D {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}
