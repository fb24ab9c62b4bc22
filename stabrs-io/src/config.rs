use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StabIoError;

/// Where a coverage run reads from and writes to.
///
/// ```toml
/// reads = "reads.csv"
/// loci = "loci.csv"
/// output = "coverage.csv"
/// points_cache = "distinct_points.txt"
/// snapshot = "segment_tree.stab"
/// ```
///
/// `output`, `points_cache` and `snapshot` are optional. Without an output the table
/// goes to stdout; without a cache or snapshot path nothing is persisted.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StabConfig {
    pub reads: PathBuf,
    pub loci: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub points_cache: Option<PathBuf>,
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

impl StabConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(reads: P, loci: Q) -> Self {
        StabConfig {
            reads: reads.into(),
            loci: loci.into(),
            output: None,
            points_cache: None,
            snapshot: None,
        }
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_points_cache<P: Into<PathBuf>>(mut self, points_cache: P) -> Self {
        self.points_cache = Some(points_cache.into());
        self
    }

    pub fn with_snapshot<P: Into<PathBuf>>(mut self, snapshot: P) -> Self {
        self.snapshot = Some(snapshot.into());
        self
    }

    ///
    /// Make every relative path relative to `base` instead of the working directory.
    ///
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };

        self.reads = resolve(self.reads);
        self.loci = resolve(self.loci);
        self.output = self.output.map(resolve);
        self.points_cache = self.points_cache.map(resolve);
        self.snapshot = self.snapshot.map(resolve);
        self
    }
}

impl TryFrom<&Path> for StabConfig {
    type Error = StabIoError;

    /// Load a TOML config file. Relative paths inside it are taken relative to the
    /// directory holding the file.
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: StabConfig = toml::from_str(&toml_str)?;

        match path.parent() {
            Some(dir) => Ok(config.resolve_relative_to(dir)),
            None => Ok(config),
        }
    }
}
