use geom::Pt2D;

/// Picks the middle control point for one curve. Through-roads keep the plain chord midpoint;
/// turns get bowed by pulling the midpoint halfway toward the intersection center. If the bias
/// lands the midpoint farther from the end than the whole start-to-end span, the branch
/// placement is odd and the bias is dropped in favor of the chord midpoint.
pub fn curve_midpoint(start: Pt2D, end: Pt2D, center: Pt2D, straight: bool) -> Pt2D {
    let raw_mid = Pt2D::center(&[start, end]);
    let mid = if straight {
        raw_mid
    } else {
        Pt2D::center(&[raw_mid, center])
    };
    // The overshoot check runs for through-roads too, but the chord midpoint can't trigger it.
    if mid.dist(end) > start.dist(end) {
        return raw_mid;
    }
    mid
}
