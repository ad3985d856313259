//! 2D geometry for laying out traffic-flow curves: points, displacement vectors, distances, and
//! the curved line through three points that every flow is drawn as.

mod curve;
mod distance;
mod pt;
mod vector;

pub use crate::curve::Curve3;
pub use crate::distance::Distance;
pub use crate::pt::Pt2D;
pub use crate::vector::{DegenerateVector, Vec2D};

/// Anything below this is considered 0.
pub const EPSILON_DIST: Distance = Distance::const_meters(0.0001);
