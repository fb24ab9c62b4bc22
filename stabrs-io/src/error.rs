use std::io;
use thiserror::Error;

use stabrs_core::errors::RecordError;
use stabrs_segtree::SegTreeError;

/// Error type for stabrs-io operations.
#[derive(Error, Debug)]
pub enum StabIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the csv reader or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An input record could not be parsed.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The tree could not be built or reassembled.
    #[error(transparent)]
    SegTree(#[from] SegTreeError),

    /// Failed to open an input or output stream.
    #[error(transparent)]
    Stream(#[from] anyhow::Error),

    /// File is not a stabrs snapshot.
    #[error("File doesn't appear to be a valid stabrs snapshot, regenerate it with `stabrs build`")]
    InvalidSnapshot,

    /// Snapshot was written by a different format version.
    #[error("Unsupported snapshot format version {0}, regenerate it with `stabrs build`")]
    UnsupportedSnapshotVersion(u32),

    /// Snapshot ended early or has bytes past its end.
    #[error("Snapshot is corrupted: {0}")]
    CorruptedSnapshot(String),

    /// A line of the points cache is not an integer.
    #[error("Invalid entry in points cache on line {line}: {value:?}")]
    InvalidPointsCache { line: usize, value: String },

    /// The config file is not valid TOML for [`crate::StabConfig`].
    #[error(transparent)]
    Config(#[from] toml::de::Error),
}

/// Result type alias for stabrs-io operations.
pub type Result<T> = std::result::Result<T, StabIoError>;
