//! # Everything stabrs reads and writes
//!
//! - reads and loci CSV files (plain or gzip'd) and the `position,coverage` result table
//! - the distinct points cache, one coordinate per line
//! - binary snapshots of a built [`SegmentTree`](stabrs_segtree::SegmentTree)
//! - the TOML run config, [`StabConfig`]
//!
//! [`pipeline`] glues these together into a full coverage run.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stabrs_io::{pipeline, StabConfig};
//! use stabrs_segtree::StabberType;
//!
//! let config = StabConfig::new("reads.csv", "loci.csv")
//!     .with_output("coverage.csv")
//!     .with_snapshot("segment_tree.stab");
//!
//! let coverage = pipeline::run(&config, StabberType::SegmentTree, false).unwrap();
//! println!("{} loci", coverage.len());
//! ```
pub mod config;
pub mod consts;
pub mod error;
pub mod pipeline;
pub mod points;
pub mod records;
pub mod snapshot;

// re-exports
pub use self::config::StabConfig;
pub use self::error::{Result, StabIoError};
pub use self::points::{read_points, read_points_from, PointsWrite};
pub use self::records::{
    read_loci, read_loci_from_path, read_reads, read_reads_from_path, write_coverage,
    write_coverage_to_path,
};
pub use self::snapshot::{read_snapshot, read_snapshot_from, snapshot_len, SnapshotWrite};
