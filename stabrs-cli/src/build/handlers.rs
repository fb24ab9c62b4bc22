use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use stabrs_io::pipeline::build_tree;
use stabrs_io::{read_reads_from_path, SnapshotWrite};

use crate::consts::PROGRESS_FLAG;

pub fn run_build(matches: &ArgMatches) -> Result<()> {
    let reads = matches
        .get_one::<String>("reads")
        .context("A path to a reads file is required.")?;

    let snapshot = matches
        .get_one::<String>("snapshot")
        .context("A path to write the snapshot to is required.")?;

    let points_cache = matches.get_one::<String>("points-cache").map(Path::new);
    let progress = matches.get_flag(PROGRESS_FLAG);

    let start = Instant::now();

    let reads = read_reads_from_path(Path::new(reads))
        .with_context(|| format!("Failed to read reads from {}", reads))?;
    let tree = build_tree(&reads, points_cache, progress)?;

    tree.write_snapshot(snapshot)
        .with_context(|| format!("Failed to write snapshot to {}", snapshot))?;

    let stats = tree.stats();
    info!(
        "Built a tree over {} points from {} reads ({} skipped) in {:.2?}",
        tree.coordinates().len(),
        stats.inserted,
        stats.skipped,
        start.elapsed()
    );
    info!("Snapshot written to {}", snapshot);

    Ok(())
}
