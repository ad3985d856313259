use std::collections::BTreeMap;
use std::io::Read;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use flow_model::{BranchPoint, DirectionPair, IntersectionID, TrafficRecord};
use geom::Pt2D;

/// The traffic columns the pipeline interprets; everything else is carried through to the
/// output as-is.
const TRAFFIC_COLUMNS: [&str; 5] = ["id", "intersection", "from_branch", "to_branch", "vehicles"];

#[derive(Deserialize)]
struct BranchRow {
    intersection: String,
    branch: String,
    x: f64,
    y: f64,
}

/// Reads the branch-point table. Expected columns: intersection, branch, x, y.
pub fn read_branch_points(path: &str) -> Result<Vec<BranchPoint>> {
    parse_branch_points(fs_err::File::open(path)?).with_context(|| format!("reading {}", path))
}

fn parse_branch_points<R: Read>(reader: R) -> Result<Vec<BranchPoint>> {
    let mut branch_points = Vec::new();
    for row in csv::Reader::from_reader(reader).deserialize() {
        let row: BranchRow = row?;
        branch_points.push(BranchPoint {
            intersection: IntersectionID(row.intersection),
            label: row.branch,
            pt: Pt2D::new(row.x, row.y),
        });
    }
    Ok(branch_points)
}

/// Reads the traffic-count table. Expected columns: id, intersection, from_branch, to_branch,
/// vehicles. Extra columns become passthrough attributes on the output features.
pub fn read_traffic_records(path: &str) -> Result<Vec<TrafficRecord>> {
    parse_traffic_records(fs_err::File::open(path)?).with_context(|| format!("reading {}", path))
}

fn parse_traffic_records<R: Read>(reader: R) -> Result<Vec<TrafficRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;

        let volume: f64 = lookup(&headers, &row, idx, "vehicles")?
            .parse()
            .with_context(|| format!("row {} has a bad vehicle count", idx + 1))?;
        let mut extra = BTreeMap::new();
        for (header, value) in headers.iter().zip(row.iter()) {
            if !TRAFFIC_COLUMNS.contains(&header) {
                extra.insert(header.to_string(), value.to_string());
            }
        }

        records.push(TrafficRecord {
            id: lookup(&headers, &row, idx, "id")?.to_string(),
            intersection: IntersectionID(lookup(&headers, &row, idx, "intersection")?.to_string()),
            direction: DirectionPair::new(
                lookup(&headers, &row, idx, "from_branch")?,
                lookup(&headers, &row, idx, "to_branch")?,
            ),
            volume,
            extra,
        });
    }
    Ok(records)
}

/// Finds one named column in a row, complaining by row number when the table doesn't have it.
fn lookup<'a>(
    headers: &csv::StringRecord,
    row: &'a csv::StringRecord,
    idx: usize,
    name: &str,
) -> Result<&'a str> {
    headers
        .iter()
        .position(|header| header == name)
        .and_then(|i| row.get(i))
        .ok_or_else(|| anyhow!("row {} is missing the {:?} column", idx + 1, name))
}
