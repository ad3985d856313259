use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use geom::{Curve3, Distance, Pt2D};

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct IntersectionID(pub String);

impl fmt::Display for IntersectionID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "intersection {}", self.0)
    }
}

/// An ordered (source branch, destination branch) label pair describing one measured flow.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DirectionPair {
    pub from: String,
    pub to: String,
}

impl DirectionPair {
    pub fn new(from: &str, to: &str) -> DirectionPair {
        DirectionPair {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Swaps the two elements; "2" -> "4" becomes "4" -> "2". Bookkeeping for reciprocal flows,
    /// not any kind of geometric inverse.
    pub fn reversed(&self) -> DirectionPair {
        DirectionPair {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

impl fmt::Display for DirectionPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// One named arm of an intersection, as a labeled location point. Labels are unique per
/// intersection in valid input, but several labels may sit on the same coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchPoint {
    pub intersection: IntersectionID,
    pub label: String,
    pub pt: Pt2D,
}

/// One directional traffic count: how many vehicles went from one branch of an intersection to
/// another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub id: String,
    pub intersection: IntersectionID,
    pub direction: DirectionPair,
    pub volume: f64,
    /// Input attributes the pipeline doesn't interpret, carried through to the output unchanged.
    pub extra: BTreeMap<String, String>,
}

/// A curve whose geometry is done, but whose volume statistics aren't filled in yet. Becomes a
/// `CurveRecord` once the whole intersection is built and its volume range is known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawCurve {
    pub id: String,
    pub intersection: IntersectionID,
    pub direction: DirectionPair,
    pub start_branch: String,
    pub volume: f64,
    pub geometry: Curve3,
    pub length: Distance,
    pub extra: BTreeMap<String, String>,
}

/// A record's volume relative to the whole intersection, for rendering (color or width scaling).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub max: f64,
    pub min: f64,
    /// In [0, 1].
    pub normalized: f64,
}

/// The finished output for one traffic record: the positioned curve plus everything a renderer
/// needs to label and scale it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    pub id: String,
    pub intersection: IntersectionID,
    pub direction: DirectionPair,
    pub start_branch: String,
    pub volume: f64,
    pub stats: VolumeStats,
    pub geometry: Curve3,
    pub length: Distance,
    pub extra: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionResult {
    pub intersection: IntersectionID,
    /// False iff the intersection has no branch points at all. A succeeded result may still
    /// carry zero curves, when no record matched a branch pair.
    pub succeeded: bool,
    pub curves: Vec<CurveRecord>,
}

/// The outcome of one batch run over every intersection in the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub processed: usize,
    pub failed: usize,
    pub curves: Vec<CurveRecord>,
}

impl BatchResult {
    /// Every single intersection was missing branch points. Worth telling the user apart from a
    /// partly-useful run.
    pub fn is_total_failure(&self) -> bool {
        self.processed > 0 && self.failed == self.processed
    }
}
