use geom::{Curve3, Pt2D, Vec2D};

use crate::{RawCurve, TrafficRecord};

/// Assembles the output curve for one record: all three points shifted by the move vector, and
/// the length measured after the shift. Volume statistics wait for the finalize pass, once the
/// whole intersection is built.
pub fn build_curve(
    record: &TrafficRecord,
    start: Pt2D,
    mid: Pt2D,
    end: Pt2D,
    shift: Vec2D,
) -> RawCurve {
    let geometry = Curve3::new(start, mid, end).translate(shift);
    let length = geometry.length();
    RawCurve {
        id: record.id.clone(),
        intersection: record.intersection.clone(),
        direction: record.direction.clone(),
        start_branch: record.direction.from.clone(),
        volume: record.volume,
        geometry,
        length,
        extra: record.extra.clone(),
    }
}
