use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D, Vec2D, EPSILON_DIST};

/// A curved line through three points: the circular arc from `start` to `end` passing through
/// `control`, or a plain straight polyline when the three points line up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve3 {
    start: Pt2D,
    control: Pt2D,
    end: Pt2D,
}

impl Curve3 {
    pub fn new(start: Pt2D, control: Pt2D, end: Pt2D) -> Curve3 {
        Curve3 {
            start,
            control,
            end,
        }
    }

    pub fn start(&self) -> Pt2D {
        self.start
    }

    pub fn control(&self) -> Pt2D {
        self.control
    }

    pub fn end(&self) -> Pt2D {
        self.end
    }

    pub fn points(&self) -> [Pt2D; 3] {
        [self.start, self.control, self.end]
    }

    /// All three points, shifted by the same displacement.
    pub fn translate(&self, shift: Vec2D) -> Curve3 {
        Curve3::new(
            self.start.translate(shift),
            self.control.translate(shift),
            self.end.translate(shift),
        )
    }

    /// Arc length. The control point splits the arc in two pieces; each is assumed to be at most
    /// a semicircle, which holds whenever the control point sits between the endpoints.
    pub fn length(&self) -> Distance {
        match self.circumcircle() {
            Some((_, radius)) => {
                let sweep = chord_angle(self.start.dist(self.control), radius)
                    + chord_angle(self.control.dist(self.end), radius);
                radius * sweep
            }
            // Collinear; measure along the polyline instead.
            None => self.start.dist(self.control) + self.control.dist(self.end),
        }
    }

    /// The circle passing through all three points, or None when they're (nearly) collinear.
    fn circumcircle(&self) -> Option<(Pt2D, Distance)> {
        let (ax, ay) = (self.start.x(), self.start.y());
        let (bx, by) = (self.control.x(), self.control.y());
        let (cx, cy) = (self.end.x(), self.end.y());

        // Twice the signed area of the triangle. The control point's height above the
        // start-to-end chord decides collinearity, so the test doesn't depend on how far apart
        // the coordinates are.
        let area2 = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
        let base = self.start.dist(self.end);
        if base == Distance::ZERO {
            return None;
        }
        let height = area2.abs() / base.inner_meters();
        if height < EPSILON_DIST.inner_meters() {
            return None;
        }

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        let a_sq = ax.powi(2) + ay.powi(2);
        let b_sq = bx.powi(2) + by.powi(2);
        let c_sq = cx.powi(2) + cy.powi(2);
        let ux = (a_sq * (by - cy) + b_sq * (cy - ay) + c_sq * (ay - by)) / d;
        let uy = (a_sq * (cx - bx) + b_sq * (ax - cx) + c_sq * (bx - ax)) / d;
        let center = Pt2D::new(ux, uy);
        Some((center, center.dist(self.start)))
    }
}

/// The central angle subtended by a chord of the given length, in radians. Always the minor
/// angle, at most pi.
fn chord_angle(chord: Distance, radius: Distance) -> f64 {
    2.0 * (chord / (2.0 * radius)).clamp(-1.0, 1.0).asin()
}

impl fmt::Display for Curve3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Curve3({} -> {} -> {})",
            self.start, self.control, self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_length() {
        let curve = Curve3::new(
            Pt2D::new(0.0, 0.0),
            Pt2D::new(5.0, 0.0),
            Pt2D::new(10.0, 0.0),
        );
        assert!((curve.length().inner_meters() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn semicircle_length() {
        // The circle through these three points has center (1, 0) and radius 1; the arc over the
        // top is half its circumference.
        let curve = Curve3::new(
            Pt2D::new(0.0, 0.0),
            Pt2D::new(1.0, 1.0),
            Pt2D::new(2.0, 0.0),
        );
        assert!((curve.length().inner_meters() - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn quarter_turn_length() {
        // Center (0, 0), radius 10, sweeping a quarter circle.
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        let curve = Curve3::new(
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0 * inv_sqrt2, 10.0 * inv_sqrt2),
            Pt2D::new(0.0, 10.0),
        );
        assert!((curve.length().inner_meters() - 5.0 * std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn translate() {
        let curve = Curve3::new(
            Pt2D::new(0.0, 0.0),
            Pt2D::new(1.0, 1.0),
            Pt2D::new(2.0, 0.0),
        );
        let shifted = curve.translate(Vec2D::new(3.0, -2.0));
        assert_eq!(Pt2D::new(3.0, -2.0), shifted.start());
        assert_eq!(Pt2D::new(4.0, -1.0), shifted.control());
        assert_eq!(Pt2D::new(5.0, -2.0), shifted.end());
        // Shifting doesn't change the shape.
        assert!((curve.length().inner_meters() - shifted.length().inner_meters()).abs() < 1e-9);
    }
}
