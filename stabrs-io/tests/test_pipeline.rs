use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::tempdir;

use stabrs_core::models::Coverage;
use stabrs_core::utils::get_dynamic_reader;
use stabrs_io::pipeline::{build_tree, compute_coverage, load_or_build_tree, run};
use stabrs_io::{read_loci_from_path, read_reads_from_path, read_snapshot, StabConfig};
use stabrs_segtree::StabberType;

#[fixture]
fn path_to_reads() -> &'static str {
    "../tests/data/reads.csv"
}

#[fixture]
fn path_to_reads_gzipped() -> &'static str {
    "../tests/data/reads.csv.gz"
}

#[fixture]
fn path_to_loci() -> &'static str {
    "../tests/data/loci.csv"
}

#[fixture]
fn path_to_config() -> &'static str {
    "../tests/data/stabrs.toml"
}

#[fixture]
fn expected_coverage() -> Vec<Coverage> {
    read_coverage(Path::new("../tests/data/expected_coverage.csv"))
}

fn read_coverage(path: &Path) -> Vec<Coverage> {
    let reader = get_dynamic_reader(path).unwrap();
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize().map(|r| r.unwrap()).collect()
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_run_matches_expected_table(
        path_to_reads: &str,
        path_to_loci: &str,
        expected_coverage: Vec<Coverage>,
    ) {
        let tempdir = tempdir().unwrap();
        let output = tempdir.path().join("coverage.csv");
        let config = StabConfig::new(path_to_reads, path_to_loci).with_output(&output);

        let coverage = run(&config, StabberType::SegmentTree, false).unwrap();
        assert_eq!(coverage, expected_coverage);

        // the written table is the same as the returned one
        assert_eq!(read_coverage(&output), expected_coverage);
    }

    #[rstest]
    fn test_gzipped_reads_give_same_table(
        path_to_reads_gzipped: &str,
        path_to_loci: &str,
        expected_coverage: Vec<Coverage>,
    ) {
        let tempdir = tempdir().unwrap();
        let config = StabConfig::new(path_to_reads_gzipped, path_to_loci)
            .with_output(tempdir.path().join("coverage.csv.gz"));

        let coverage = run(&config, StabberType::SegmentTree, false).unwrap();
        assert_eq!(coverage, expected_coverage);
        assert_eq!(
            read_coverage(config.output.as_deref().unwrap()),
            expected_coverage
        );
    }

    #[rstest]
    fn test_naive_backend_agrees(
        path_to_reads: &str,
        path_to_loci: &str,
        expected_coverage: Vec<Coverage>,
    ) {
        let tempdir = tempdir().unwrap();
        let config = StabConfig::new(path_to_reads, path_to_loci)
            .with_output(tempdir.path().join("coverage.csv"));

        let coverage = run(&config, StabberType::Naive, false).unwrap();
        assert_eq!(coverage, expected_coverage);
    }

    #[rstest]
    fn test_caches_are_written_and_reused(
        path_to_reads: &str,
        path_to_loci: &str,
        expected_coverage: Vec<Coverage>,
    ) {
        let tempdir = tempdir().unwrap();
        let points_cache = tempdir.path().join("cache/distinct_points.txt");
        let snapshot = tempdir.path().join("cache/segment_tree.stab");

        let config = StabConfig::new(path_to_reads, path_to_loci)
            .with_output(tempdir.path().join("first.csv"))
            .with_points_cache(&points_cache)
            .with_snapshot(&snapshot);

        let first = run(&config, StabberType::SegmentTree, false).unwrap();
        assert!(points_cache.is_file());
        assert!(snapshot.is_file());

        // a second run restores the snapshot instead of reading the reads again
        let config = StabConfig::new(tempdir.path().join("no_such_reads.csv"), path_to_loci)
            .with_output(tempdir.path().join("second.csv"))
            .with_points_cache(&points_cache)
            .with_snapshot(&snapshot);
        let second = run(&config, StabberType::SegmentTree, false).unwrap();

        assert_eq!(first, expected_coverage);
        assert_eq!(second, expected_coverage);
    }

    #[rstest]
    fn test_snapshot_tree_equals_fresh_build(path_to_reads: &str, path_to_loci: &str) {
        let tempdir = tempdir().unwrap();
        let snapshot = tempdir.path().join("segment_tree.stab");
        let config = StabConfig::new(path_to_reads, path_to_loci).with_snapshot(&snapshot);

        let built = load_or_build_tree(&config, false).unwrap();
        let restored = read_snapshot(&snapshot).unwrap();
        assert_eq!(restored, built);

        let loci = read_loci_from_path(Path::new(path_to_loci)).unwrap();
        assert_eq!(
            compute_coverage(&restored, &loci),
            compute_coverage(&built, &loci)
        );
    }

    #[rstest]
    fn test_inverted_read_is_skipped(path_to_reads: &str) {
        let reads = read_reads_from_path(Path::new(path_to_reads)).unwrap();
        let tree = build_tree(&reads, None, false).unwrap();

        assert_eq!(tree.stats().skipped, 1);
        assert_eq!(tree.stats().inserted, reads.len() - 1);
    }

    #[rstest]
    fn test_run_from_config_file(path_to_config: &str, expected_coverage: Vec<Coverage>) {
        let tempdir = tempdir().unwrap();
        let config = StabConfig::try_from(Path::new(path_to_config))
            .unwrap()
            .with_output(tempdir.path().join("coverage.csv"));

        assert_eq!(config.reads, PathBuf::from("../tests/data/reads.csv"));

        let coverage = run(&config, StabberType::SegmentTree, false).unwrap();
        assert_eq!(coverage, expected_coverage);
    }
}
