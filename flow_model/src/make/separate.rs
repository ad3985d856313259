use std::collections::BTreeSet;

use geom::{Pt2D, Vec2D};

use crate::{DirectionPair, TrafficRecord};

/// How far a through-road's curve is shifted off its chord.
const STRAIGHT_SHIFT: f64 = 2.0;
/// Shift for the first turn curve between a pair of branches.
const TURN_SHIFT: f64 = 6.0;
/// Shift for the reciprocal turn curve (same branch pair, opposite direction), so the two bowed
/// curves don't land on top of each other.
const RECIPROCAL_TURN_SHIFT: f64 = 10.0;

/// Computes the sideways shift keeping this record's curve apart from its neighbors.
/// `moved_directions` remembers which direction pairs of the current intersection already got a
/// curve; it starts empty for every intersection and is threaded through its records in
/// processing order. Whichever direction of a reciprocal pair comes first gets the smaller
/// shift, so the input order shows in the output.
pub fn move_vector(
    record: &TrafficRecord,
    start: Pt2D,
    center: Pt2D,
    unit_perp: Vec2D,
    straight: bool,
    moved_directions: &mut BTreeSet<DirectionPair>,
) -> Vec2D {
    if straight {
        // Through-roads don't bow toward the center, so they skip the separation bookkeeping
        // entirely, orientation fix included.
        return unit_perp * STRAIGHT_SHIFT;
    }

    // Point the shift away from the intersection center.
    let mut away = unit_perp;
    if start.translate(away).dist(center) < start.dist(center) {
        away = -away;
    }

    if moved_directions.contains(&record.direction.reversed()) {
        away * RECIPROCAL_TURN_SHIFT
    } else {
        moved_directions.insert(record.direction.clone());
        away * TURN_SHIFT
    }
}
