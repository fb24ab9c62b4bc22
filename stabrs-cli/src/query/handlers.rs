use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{debug, info};

use stabrs_io::pipeline::compute_coverage;
use stabrs_io::{read_loci_from_path, read_snapshot, write_coverage_to_path};

pub fn run_query(matches: &ArgMatches) -> Result<()> {
    let snapshot = matches
        .get_one::<String>("snapshot")
        .context("A path to a tree snapshot is required.")?;

    let loci = matches
        .get_one::<String>("loci")
        .context("A path to a loci file is required.")?;

    let output = matches.get_one::<String>("output").map(Path::new);

    let start = Instant::now();

    let tree = read_snapshot(snapshot)
        .with_context(|| format!("Failed to load snapshot {}", snapshot))?;
    debug!(
        "Restored a tree over {} points in {:.2?}",
        tree.coordinates().len(),
        start.elapsed()
    );

    let loci = read_loci_from_path(Path::new(loci))
        .with_context(|| format!("Failed to read loci from {}", loci))?;

    let coverage = compute_coverage(&tree, &loci);
    write_coverage_to_path(output, &coverage)?;

    info!("Queried {} loci in {:.2?}", coverage.len(), start.elapsed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use stabrs_io::pipeline::build_tree;
    use stabrs_io::{read_reads_from_path, SnapshotWrite};

    use crate::build_parser;
    use crate::query::cli::QUERY_CMD;

    #[fixture]
    fn expected_table() -> String {
        std::fs::read_to_string("../tests/data/expected_coverage.csv").unwrap()
    }

    #[rstest]
    fn test_run_query_reproduces_expected_table(expected_table: String) {
        let tempdir = tempfile::tempdir().unwrap();
        let snapshot = tempdir.path().join("tree.stab");
        let output = tempdir.path().join("coverage.csv");

        let reads = read_reads_from_path(Path::new("../tests/data/reads.csv")).unwrap();
        build_tree(&reads, None, false)
            .unwrap()
            .write_snapshot(&snapshot)
            .unwrap();

        let matches = build_parser()
            .try_get_matches_from([
                "stabrs",
                QUERY_CMD,
                "--snapshot",
                snapshot.to_str().unwrap(),
                "--loci",
                "../tests/data/loci.csv",
                "--output",
                output.to_str().unwrap(),
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        run_query(sub).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), expected_table);
    }

    #[rstest]
    fn test_run_query_rejects_non_snapshot() {
        let matches = build_parser()
            .try_get_matches_from([
                "stabrs",
                QUERY_CMD,
                "--snapshot",
                "../tests/data/reads.csv",
                "--loci",
                "../tests/data/loci.csv",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        let err = run_query(sub).unwrap_err();
        assert!(format!("{:#}", err).contains("regenerate"));
    }
}
