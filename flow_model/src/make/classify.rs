use crate::{BranchPoint, DirectionPair, FlowError};

/// Decides whether a direction pair is a through-road rather than a turn: a four-branch
/// intersection whose pair of labels differ by exactly 2 (so "1"-"3" or "2"-"4") is the only
/// shape treated as straight. This leans on the labeling convention that branches are numbered
/// "1" through "n" going around the intersection; it's an approximation, not real geometry, so
/// don't generalize it.
pub fn is_straight(
    branch_points: &[BranchPoint],
    direction: &DirectionPair,
) -> Result<bool, FlowError> {
    let mut highest_branch = 0;
    for bp in branch_points {
        highest_branch = highest_branch.max(parse_label(&bp.label)?);
    }
    if highest_branch != 4 {
        return Ok(false);
    }
    let from = parse_label(&direction.from)?;
    let to = parse_label(&direction.to)?;
    Ok((from - to).abs() == 2)
}

fn parse_label(label: &str) -> Result<i64, FlowError> {
    label
        .parse::<i64>()
        .map_err(|_| FlowError::InvalidBranchLabel(label.to_string()))
}
