use std::{fmt, ops};

use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D};

/// Normalizing a zero-length vector is meaningless; callers decide whether to skip or abort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("can't normalize a zero-length vector")]
pub struct DegenerateVector;

/// A displacement between two points in world space, in meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2D {
    x: f64,
    y: f64,
}

impl Vec2D {
    pub fn new(x: f64, y: f64) -> Vec2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Vec2D {}, {}", x, y);
        }

        Vec2D { x, y }
    }

    /// The displacement carrying `from` onto `to`.
    pub fn between(from: Pt2D, to: Pt2D) -> Vec2D {
        Vec2D::new(to.x() - from.x(), to.y() - from.y())
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn length(self) -> Distance {
        Distance::meters((self.x.powi(2) + self.y.powi(2)).sqrt())
    }

    /// Rotates 90 degrees counter-clockwise: `(x, y)` becomes `(-y, x)`. Same length.
    pub fn perpendicular(self) -> Vec2D {
        Vec2D::new(-self.y, self.x)
    }

    /// Scales to length 1, keeping the direction. Fails when there's no direction to keep.
    pub fn normalized(self) -> Result<Vec2D, DegenerateVector> {
        let len = self.length();
        if len == Distance::ZERO {
            return Err(DegenerateVector);
        }
        Ok(Vec2D::new(
            self.x / len.inner_meters(),
            self.y / len.inner_meters(),
        ))
    }
}

impl fmt::Display for Vec2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Vec2D({0}, {1})", self.x(), self.y())
    }
}

impl ops::Mul<f64> for Vec2D {
    type Output = Vec2D;

    fn mul(self, scalar: f64) -> Vec2D {
        Vec2D::new(self.x * scalar, self.y * scalar)
    }
}

impl ops::Neg for Vec2D {
    type Output = Vec2D;

    fn neg(self) -> Vec2D {
        Vec2D::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized() {
        assert_eq!(
            Vec2D::new(0.6, 0.8),
            Vec2D::new(3.0, 4.0).normalized().unwrap()
        );
        assert_eq!(
            Err(DegenerateVector),
            Vec2D::between(Pt2D::new(2.0, 2.0), Pt2D::new(2.0, 2.0)).normalized()
        );
    }

    #[test]
    fn perpendicular() {
        assert_eq!(Vec2D::new(-4.0, 3.0), Vec2D::new(3.0, 4.0).perpendicular());
        // Perpendicular twice is a half turn.
        assert_eq!(
            Vec2D::new(-3.0, -4.0),
            Vec2D::new(3.0, 4.0).perpendicular().perpendicular()
        );
    }
}
