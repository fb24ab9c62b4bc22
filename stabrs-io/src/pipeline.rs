//! The whole coverage run: reads -> points -> tree -> coverage table.
//!
//! Every cache here is an optimization only. With all of them missing the run
//! computes everything from the reads and gives the same table.
use std::path::Path;

use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::{info, warn};

use stabrs_core::models::{Coverage, Interval, Locus, Read};
use stabrs_segtree::{CoordinateSet, NaiveScan, SegTreeError, SegmentTree, Stabber, StabberType};

use crate::config::StabConfig;
use crate::consts::PROGRESS_TEMPLATE;
use crate::error::Result;
use crate::points::{read_points, PointsWrite};
use crate::records::{read_loci_from_path, read_reads_from_path, write_coverage_to_path};
use crate::snapshot::{read_snapshot, SnapshotWrite};

fn insertion_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        bar.set_style(style.progress_chars("##-"));
    }
    bar.set_message("inserting reads");
    bar
}

///
/// Get the distinct points for a set of reads.
///
/// If `cache` names an existing file the points are loaded from it, otherwise they
/// are computed from the reads and, when `cache` is set, written there.
///
pub fn load_or_build_points(reads: &[Read], cache: Option<&Path>) -> Result<CoordinateSet> {
    if let Some(cache) = cache {
        if cache.is_file() {
            info!("Loading distinct points from {}", cache.display());
            return read_points(cache);
        }
    }

    let coords = CoordinateSet::from_intervals(reads.iter().map(Interval::from));

    if let Some(cache) = cache {
        coords.write_points(cache)?;
        info!(
            "Wrote {} distinct points to {}",
            coords.len(),
            cache.display()
        );
    }

    Ok(coords)
}

///
/// Build a segment tree for the reads, going through the points cache if one is given.
///
/// A points cache that doesn't match the reads is rebuilt and overwritten.
///
pub fn build_tree(
    reads: &[Read],
    points_cache: Option<&Path>,
    progress: bool,
) -> Result<SegmentTree> {
    let coords = load_or_build_points(reads, points_cache)?;

    let bar = insertion_bar(reads.len(), progress);
    let built = SegmentTree::build(
        coords,
        reads.iter().map(Interval::from).progress_with(bar.clone()),
    );
    bar.finish_and_clear();

    match (built, points_cache) {
        (Ok(tree), _) => Ok(tree),
        (Err(SegTreeError::EndpointNotInCoordinates(position)), Some(cache)) => {
            warn!(
                "Points cache {} does not contain read endpoint {}, rebuilding it",
                cache.display(),
                position
            );
            let coords = CoordinateSet::from_intervals(reads.iter().map(Interval::from));
            coords.write_points(cache)?;
            Ok(SegmentTree::build(coords, reads.iter().map(Interval::from))?)
        }
        (Err(e), _) => Err(e.into()),
    }
}

///
/// Restore the tree from the configured snapshot, or build it from the reads.
///
/// A freshly built tree is written to the snapshot path when one is configured.
///
pub fn load_or_build_tree(config: &StabConfig, progress: bool) -> Result<SegmentTree> {
    if let Some(snapshot) = config.snapshot.as_deref() {
        if snapshot.is_file() {
            info!("Loading segment tree snapshot from {}", snapshot.display());
            return read_snapshot(snapshot);
        }
    }

    let reads = read_reads_from_path(&config.reads)?;
    info!("Read {} reads from {}", reads.len(), config.reads.display());

    let tree = build_tree(&reads, config.points_cache.as_deref(), progress)?;

    if let Some(snapshot) = config.snapshot.as_deref() {
        tree.write_snapshot(snapshot)?;
        info!("Wrote segment tree snapshot to {}", snapshot.display());
    }

    Ok(tree)
}

///
/// Query every locus, keeping the input order.
///
pub fn compute_coverage<S>(stabber: &S, loci: &[Locus]) -> Vec<Coverage>
where
    S: Stabber + ?Sized,
{
    loci.iter()
        .map(|locus| locus.with_coverage(stabber.stab_query(locus.position)))
        .collect()
}

///
/// Run a whole coverage job described by `config` and write the table to its output.
///
/// # Returns
/// - the coverage rows, in the order of the loci file
pub fn run(config: &StabConfig, backend: StabberType, progress: bool) -> Result<Vec<Coverage>> {
    let stabber: Box<dyn Stabber> = match backend {
        StabberType::SegmentTree => Box::new(load_or_build_tree(config, progress)?),
        StabberType::Naive => {
            let reads = read_reads_from_path(&config.reads)?;
            Box::new(NaiveScan::build(
                reads.iter().map(Interval::from).collect(),
            ))
        }
    };

    let loci = read_loci_from_path(&config.loci)?;
    info!(
        "Querying {} loci with the {} backend",
        loci.len(),
        backend
    );

    let coverage = compute_coverage(stabber.as_ref(), &loci);
    write_coverage_to_path(config.output.as_deref(), &coverage)?;

    if let Some(output) = config.output.as_deref() {
        info!("Wrote coverage for {} loci to {}", coverage.len(), output.display());
    }

    Ok(coverage)
}
