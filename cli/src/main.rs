//! Computes visual traffic-flow curves from CSV tables of branch points and directional counts,
//! and writes the result as GeoJSON.

#[macro_use]
extern crate log;

mod export;
mod import;

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use structopt::StructOpt;

use flowutil::time::{prettyprint_usize, Progress};

#[derive(StructOpt)]
#[structopt(
    name = "flowmap",
    about = "Computes visual traffic-flow curves for road intersections"
)]
struct Args {
    /// A CSV table of branch points, with columns: intersection, branch, x, y
    #[structopt(long)]
    branches: String,
    /// A CSV table of directional traffic counts, with columns: id, intersection, from_branch,
    /// to_branch, vehicles. Extra columns are carried through to the output.
    #[structopt(long)]
    traffic: String,
    /// The path to write GeoJSON output to
    #[structopt(long)]
    out: String,
}

fn main() -> Result<()> {
    flowutil::logger::setup();
    let args = Args::from_args();

    let branch_points = import::read_branch_points(&args.branches)?;
    let records = import::read_traffic_records(&args.traffic)?;
    info!(
        "Read {} branch points and {} traffic records",
        prettyprint_usize(branch_points.len()),
        prettyprint_usize(records.len())
    );

    let num_intersections = records
        .iter()
        .map(|record| &record.intersection)
        .collect::<BTreeSet<_>>()
        .len();
    let mut progress = Progress::new("process intersections", num_intersections);
    let mut on_progress = |_: usize, _: usize| progress.next();
    let batch = flow_model::process(branch_points, records, Some(&mut on_progress))?;

    // The one-time summary the operator actually cares about.
    info!("Total number of intersections: {}", batch.processed);
    info!(
        "Number of intersections without any location features: {}",
        batch.failed
    );
    if batch.is_total_failure() {
        bail!(
            "none of the {} intersections had branch points; check that the two tables use the \
             same intersection ids",
            batch.processed
        );
    }

    export::write_geojson(&batch.curves, &args.out)?;
    info!(
        "Wrote {} curves to {}",
        prettyprint_usize(batch.curves.len()),
        args.out
    );
    Ok(())
}
