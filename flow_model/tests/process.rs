use std::collections::BTreeMap;

use geom::Pt2D;

use flow_model::{
    process, process_intersection, BranchPoint, DirectionPair, FlowError, IntersectionID,
    TrafficRecord,
};

fn branch(intersection: &str, label: &str, x: f64, y: f64) -> BranchPoint {
    BranchPoint {
        intersection: IntersectionID(intersection.to_string()),
        label: label.to_string(),
        pt: Pt2D::new(x, y),
    }
}

fn record(id: &str, intersection: &str, from: &str, to: &str, volume: f64) -> TrafficRecord {
    TrafficRecord {
        id: id.to_string(),
        intersection: IntersectionID(intersection.to_string()),
        direction: DirectionPair::new(from, to),
        volume,
        extra: BTreeMap::new(),
    }
}

/// A square four-branch intersection.
fn square_branches(intersection: &str) -> Vec<BranchPoint> {
    vec![
        branch(intersection, "1", 0.0, 0.0),
        branch(intersection, "2", 10.0, 0.0),
        branch(intersection, "3", 10.0, 10.0),
        branch(intersection, "4", 0.0, 10.0),
    ]
}

#[test]
fn through_road_stays_on_its_shifted_chord() {
    let result = process_intersection(
        &IntersectionID("X".to_string()),
        &square_branches("X"),
        &[record("r1", "X", "1", "3", 7.0)],
    )
    .unwrap();

    assert!(result.succeeded);
    assert_eq!(1, result.curves.len());
    let curve = &result.curves[0];

    // "1" to "3" crosses a four-branch intersection, so it classifies straight: the control
    // point is the unbiased chord midpoint and the whole thing shifts by 2 along the unit
    // perpendicular of (10, 10), which is (-1, 1) / sqrt(2).
    let shift = 2.0 / 2.0_f64.sqrt();
    let [start, control, end] = curve.geometry.points();
    assert!((start.x() - (0.0 - shift)).abs() < 1e-9);
    assert!((start.y() - (0.0 + shift)).abs() < 1e-9);
    assert!((control.x() - (5.0 - shift)).abs() < 1e-9);
    assert!((control.y() - (5.0 + shift)).abs() < 1e-9);
    assert!((end.x() - (10.0 - shift)).abs() < 1e-9);
    assert!((end.y() - (10.0 + shift)).abs() < 1e-9);

    // Still a straight segment, so its length is the plain diagonal.
    assert!((curve.length.inner_meters() - 200.0_f64.sqrt()).abs() < 1e-6);

    // The only record is the intersection max, and normalization runs against 0.
    assert_eq!(7.0, curve.stats.max);
    assert_eq!(0.0, curve.stats.min);
    assert_eq!(1.0, curve.stats.normalized);
    assert_eq!("1", curve.start_branch);
}

#[test]
fn volumes_normalize_against_the_intersection_max() {
    let branches = vec![
        branch("Y", "1", 0.0, 0.0),
        branch("Y", "2", 10.0, 0.0),
        branch("Y", "3", 5.0, 8.0),
    ];
    let records = vec![
        record("a", "Y", "1", "2", 5.0),
        record("b", "Y", "2", "3", 20.0),
        record("c", "Y", "3", "1", 5.0),
    ];
    let result =
        process_intersection(&IntersectionID("Y".to_string()), &branches, &records).unwrap();

    let normalized: Vec<f64> = result.curves.iter().map(|c| c.stats.normalized).collect();
    assert_eq!(vec![0.25, 1.0, 0.25], normalized);
    for curve in &result.curves {
        assert_eq!(20.0, curve.stats.max);
        assert_eq!(0.0, curve.stats.min);
    }
}

#[test]
fn all_zero_volumes_cant_normalize() {
    let id = IntersectionID("Z".to_string());
    let branches = vec![
        branch("Z", "1", 0.0, 0.0),
        branch("Z", "2", 10.0, 0.0),
        branch("Z", "3", 5.0, 8.0),
    ];
    let records = vec![
        record("a", "Z", "1", "2", 0.0),
        record("b", "Z", "2", "1", 0.0),
    ];
    assert_eq!(
        Err(FlowError::ZeroMaxVolume(id.clone())),
        process_intersection(&id, &branches, &records)
    );
}

#[test]
fn unmatched_records_leave_a_successful_empty_intersection() {
    // The branch labels exist, but no record names a resolvable pair, so zero curves get built.
    // That's still success, and no normalization happens (or fails) for an empty set.
    let result = process_intersection(
        &IntersectionID("W".to_string()),
        &square_branches("W"),
        &[record("a", "W", "8", "9", 0.0)],
    )
    .unwrap();
    assert!(result.succeeded);
    assert!(result.curves.is_empty());
}

#[test]
fn coincident_branches_skip_the_record() {
    // Branches "1" and "2" sit on the same point, so the direction vector can't normalize. The
    // record is skipped, but the intersection still succeeds with the remaining record.
    let branches = vec![
        branch("V", "1", 0.0, 0.0),
        branch("V", "2", 0.0, 0.0),
        branch("V", "3", 5.0, 8.0),
    ];
    let records = vec![
        record("a", "V", "1", "2", 9.0),
        record("b", "V", "1", "3", 4.0),
    ];
    let result =
        process_intersection(&IntersectionID("V".to_string()), &branches, &records).unwrap();
    assert!(result.succeeded);
    assert_eq!(1, result.curves.len());
    assert_eq!("b", result.curves[0].id);
}

#[test]
fn reciprocal_turns_separate_by_different_amounts() {
    let branches = vec![
        branch("T", "1", 0.0, 0.0),
        branch("T", "2", 10.0, 0.0),
        branch("T", "3", 5.0, 8.0),
    ];
    let records = vec![
        record("a", "T", "1", "2", 3.0),
        record("b", "T", "2", "1", 3.0),
    ];
    let result =
        process_intersection(&IntersectionID("T".to_string()), &branches, &records).unwrap();
    assert_eq!(2, result.curves.len());

    // Both curves start from a branch point and get carried sideways by their move vector; the
    // one processed first moves 6, the reciprocal one 10.
    let first_shift = result.curves[0]
        .geometry
        .start()
        .dist(Pt2D::new(0.0, 0.0))
        .inner_meters();
    let second_shift = result.curves[1]
        .geometry
        .start()
        .dist(Pt2D::new(10.0, 0.0))
        .inner_meters();
    assert!((first_shift - 6.0).abs() < 1e-9);
    assert!((second_shift - 10.0).abs() < 1e-9);
}

#[test]
fn batch_keeps_going_past_missing_intersections() {
    // "A" appears in the traffic records but has no branch points; "B" is fine.
    let mut branch_points = square_branches("B");
    branch_points.push(branch("ignored", "1", 50.0, 50.0));

    let records = vec![
        record("a1", "A", "1", "2", 5.0),
        record("b1", "B", "1", "3", 7.0),
        record("b2", "B", "2", "1", 6.0),
    ];

    let mut progress_calls = Vec::new();
    let mut callback = |done: usize, total: usize| progress_calls.push((done, total));
    let batch = process(branch_points, records, Some(&mut callback)).unwrap();

    assert_eq!(2, batch.processed);
    assert_eq!(1, batch.failed);
    assert!(!batch.is_total_failure());
    // Only B built curves, and only B's records count.
    assert_eq!(2, batch.curves.len());
    assert!(batch
        .curves
        .iter()
        .all(|c| c.intersection == IntersectionID("B".to_string())));
    assert_eq!(vec![(1, 2), (2, 2)], progress_calls);
}

#[test]
fn total_failure_is_distinguishable() {
    let records = vec![
        record("a1", "A", "1", "2", 5.0),
        record("b1", "B", "1", "3", 7.0),
    ];
    let batch = process(Vec::new(), records, None).unwrap();
    assert_eq!(2, batch.processed);
    assert_eq!(2, batch.failed);
    assert!(batch.is_total_failure());
    assert!(batch.curves.is_empty());
}
