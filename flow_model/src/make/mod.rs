//! Turns labeled branch points and directional traffic counts into one offset curve per count,
//! roughly by
//!
//! 1) resolving each record's source and destination branch points by label
//! 2) classifying the branch pair as a through-road or a turn
//! 3) bowing turns toward the intersection center
//! 4) shifting every curve sideways so reciprocal and co-located flows stay apart
//! 5) normalizing volumes against the intersection's maximum, for rendering
//!
//! Intersections are handled one at a time, strictly in order. That's deliberate: which curve of
//! a reciprocal pair gets the larger shift depends on processing order, so reordering (or
//! parallelizing) would change visible output.

mod build;
mod center;
mod classify;
mod match_branches;
mod separate;
mod shape;

pub use build::build_curve;
pub use center::center_point;
pub use classify::is_straight;
pub use match_branches::match_branches;
pub use separate::move_vector;
pub use shape::curve_midpoint;

use std::collections::{BTreeMap, BTreeSet};

use geom::Vec2D;

use crate::{
    BatchResult, BranchPoint, CurveRecord, DirectionPair, FlowError, IntersectionID,
    IntersectionResult, RawCurve, TrafficRecord, VolumeStats,
};

/// Runs the whole batch: partitions the input by intersection id and processes every
/// intersection that has traffic records, in the order ids first appear in the records. Branch
/// points whose id never shows up in the records are ignored. The optional callback fires after
/// each intersection with (completed, total); it observes progress and can't affect results.
///
/// An intersection with no branch points counts as failed and produces no curves, but the batch
/// keeps going. Bad branch labels and all-zero volumes abort the batch with a distinct error.
pub fn process(
    branch_points: Vec<BranchPoint>,
    records: Vec<TrafficRecord>,
    mut progress: Option<&mut dyn FnMut(usize, usize)>,
) -> Result<BatchResult, FlowError> {
    let mut id_order: Vec<IntersectionID> = Vec::new();
    let mut records_per_id: BTreeMap<IntersectionID, Vec<TrafficRecord>> = BTreeMap::new();
    for record in records {
        if !records_per_id.contains_key(&record.intersection) {
            id_order.push(record.intersection.clone());
        }
        records_per_id
            .entry(record.intersection.clone())
            .or_insert_with(Vec::new)
            .push(record);
    }
    let mut branches_per_id: BTreeMap<IntersectionID, Vec<BranchPoint>> = BTreeMap::new();
    for bp in branch_points {
        branches_per_id
            .entry(bp.intersection.clone())
            .or_insert_with(Vec::new)
            .push(bp);
    }

    let total = id_order.len();
    let mut batch = BatchResult {
        processed: 0,
        failed: 0,
        curves: Vec::new(),
    };
    for (idx, id) in id_order.into_iter().enumerate() {
        let branches = branches_per_id
            .get(&id)
            .map(|list| list.as_slice())
            .unwrap_or(&[]);
        let result = process_intersection(&id, branches, &records_per_id[&id])?;
        batch.processed += 1;
        if !result.succeeded {
            batch.failed += 1;
        }
        batch.curves.extend(result.curves);
        if let Some(ref mut callback) = progress {
            callback(idx + 1, total);
        }
    }
    Ok(batch)
}

/// Builds all the curves for one intersection. Records that don't resolve both branch points
/// are skipped without comment; records whose two branches sit on the same point are skipped
/// with a warning. Curves are committed all at once, after the volume-normalizing pass over the
/// finished intersection.
pub fn process_intersection(
    id: &IntersectionID,
    branch_points: &[BranchPoint],
    records: &[TrafficRecord],
) -> Result<IntersectionResult, FlowError> {
    if branch_points.is_empty() {
        return Ok(IntersectionResult {
            intersection: id.clone(),
            succeeded: false,
            curves: Vec::new(),
        });
    }

    let center = center_point(id, branch_points)?;

    let mut raw_curves: Vec<RawCurve> = Vec::new();
    let mut max_volume = 0.0_f64;
    let mut observed_min: Option<f64> = None;
    // Which direction pairs already got a curve here. Scoped to this one intersection.
    let mut moved_directions: BTreeSet<DirectionPair> = BTreeSet::new();

    for record in records {
        let (start, end) = match_branches(record, branch_points);
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };

        let straight = is_straight(branch_points, &record.direction)?;
        let mid = curve_midpoint(start, end, center, straight);

        let unit_perp = match Vec2D::between(start, end).perpendicular().normalized() {
            Ok(v) => v,
            Err(_) => {
                warn!(
                    "Skipping record {} at {}: branches {} sit on the same point",
                    record.id, id, record.direction
                );
                continue;
            }
        };
        let shift = move_vector(
            record,
            start,
            center,
            unit_perp,
            straight,
            &mut moved_directions,
        );

        raw_curves.push(build_curve(record, start, mid, end, shift));
        max_volume = max_volume.max(record.volume);
        observed_min = Some(match observed_min {
            Some(min) => min.min(record.volume),
            None => record.volume,
        });
    }

    let curves = finalize_volumes(id, raw_curves, max_volume, observed_min)?;
    Ok(IntersectionResult {
        intersection: id.clone(),
        succeeded: true,
        curves,
    })
}

/// The second phase: once every curve of an intersection exists, stamp each one with the
/// intersection's volume range and its own normalized volume.
fn finalize_volumes(
    id: &IntersectionID,
    raw_curves: Vec<RawCurve>,
    max_volume: f64,
    observed_min: Option<f64>,
) -> Result<Vec<CurveRecord>, FlowError> {
    if raw_curves.is_empty() {
        return Ok(Vec::new());
    }
    if max_volume == 0.0 {
        return Err(FlowError::ZeroMaxVolume(id.clone()));
    }

    // Volumes normalize against zero, not against the smallest observed count.
    let min_volume = 0.0;
    if let Some(observed) = observed_min {
        if observed != min_volume {
            debug!(
                "{}: smallest volume is {}, but normalizing against 0",
                id, observed
            );
        }
    }

    Ok(raw_curves
        .into_iter()
        .map(|raw| {
            let normalized = (raw.volume - min_volume) / (max_volume - min_volume);
            CurveRecord {
                id: raw.id,
                intersection: raw.intersection,
                direction: raw.direction,
                start_branch: raw.start_branch,
                volume: raw.volume,
                stats: VolumeStats {
                    max: max_volume,
                    min: min_volume,
                    normalized,
                },
                geometry: raw.geometry,
                length: raw.length,
                extra: raw.extra,
            }
        })
        .collect())
}
