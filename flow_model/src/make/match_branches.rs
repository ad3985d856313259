use geom::Pt2D;

use crate::{BranchPoint, TrafficRecord};

/// Finds the branch points named by a record's direction pair. Branches are scanned in input
/// order and the scan stops as soon as both sides are resolved; if a label somehow appears
/// twice, the first point wins, and a point matching the source side is never considered for
/// the destination. Either side comes back None when no branch carries that label.
pub fn match_branches(
    record: &TrafficRecord,
    branch_points: &[BranchPoint],
) -> (Option<Pt2D>, Option<Pt2D>) {
    let mut start: Option<Pt2D> = None;
    let mut end: Option<Pt2D> = None;
    for bp in branch_points {
        if bp.label == record.direction.from {
            start.get_or_insert(bp.pt);
        } else if bp.label == record.direction.to {
            end.get_or_insert(bp.pt);
        }
        if start.is_some() && end.is_some() {
            break;
        }
    }
    (start, end)
}
