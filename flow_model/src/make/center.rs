use std::collections::BTreeSet;

use ordered_float::NotNan;

use geom::Pt2D;

use crate::{BranchPoint, FlowError, IntersectionID};

/// The geometric center of an intersection: the mean of its branches' distinct x coordinates
/// crossed with the mean of the distinct y's. Branches stacked on the same spot only count once.
pub fn center_point(
    id: &IntersectionID,
    branch_points: &[BranchPoint],
) -> Result<Pt2D, FlowError> {
    if branch_points.is_empty() {
        return Err(FlowError::EmptyIntersection(id.clone()));
    }

    // Pt2D guarantees finite coordinates, so NotNan can't fail.
    let xs: BTreeSet<NotNan<f64>> = branch_points
        .iter()
        .map(|bp| NotNan::new(bp.pt.x()).unwrap())
        .collect();
    let ys: BTreeSet<NotNan<f64>> = branch_points
        .iter()
        .map(|bp| NotNan::new(bp.pt.y()).unwrap())
        .collect();
    let avg = |set: &BTreeSet<NotNan<f64>>| {
        set.iter().map(|v| v.into_inner()).sum::<f64>() / (set.len() as f64)
    };
    Ok(Pt2D::new(avg(&xs), avg(&ys)))
}
