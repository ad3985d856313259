use thiserror::Error;

use crate::IntersectionID;

/// The failures that abort processing, as opposed to records that are quietly skipped.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("{0} has no branch points")]
    EmptyIntersection(IntersectionID),
    #[error("branch label {0:?} isn't numeric")]
    InvalidBranchLabel(String),
    #[error("every record in {0} has zero volume; can't normalize")]
    ZeroMaxVolume(IntersectionID),
}
