//! Computes visual traffic-flow curves for road intersections. Each directional traffic count
//! (so many vehicles from branch A to branch B) becomes one curved or straight line, bowed and
//! shifted so the flows at one intersection don't draw on top of each other, and annotated with
//! volume statistics normalized per intersection for rendering.

#[macro_use]
extern crate log;

mod error;
mod make;
mod objects;

pub use crate::error::FlowError;
pub use crate::make::{
    build_curve, center_point, curve_midpoint, is_straight, match_branches, move_vector, process,
    process_intersection,
};
pub use crate::objects::{
    BatchResult, BranchPoint, CurveRecord, DirectionPair, IntersectionID, IntersectionResult,
    RawCurve, TrafficRecord, VolumeStats,
};
