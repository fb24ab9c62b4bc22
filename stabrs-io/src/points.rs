use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use stabrs_segtree::CoordinateSet;

use crate::error::{Result, StabIoError};

pub trait PointsWrite {
    ///
    /// Write the distinct coordinates as a points cache: one integer per line, ascending.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_points<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    /// Same as [`PointsWrite::write_points`] for any writer.
    fn write_points_to<W: Write>(&self, writer: W) -> Result<()>;
}

impl PointsWrite for CoordinateSet {
    fn write_points<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.write_points_to(BufWriter::new(file))
    }

    fn write_points_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for point in self {
            writeln!(writer, "{}", point)?;
        }
        writer.flush()?;
        Ok(())
    }
}

///
/// Load a points cache written by [`PointsWrite`].
///
/// Blank lines are skipped. The list has to be strictly increasing, otherwise it was
/// not written by us and is rejected.
///
pub fn read_points<T: AsRef<Path>>(path: T) -> Result<CoordinateSet> {
    let file = File::open(path.as_ref())?;
    read_points_from(BufReader::new(file))
}

pub fn read_points_from<R: BufRead>(reader: R) -> Result<CoordinateSet> {
    let mut values = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| StabIoError::InvalidPointsCache {
                line: i + 1,
                value: trimmed.to_string(),
            })?;
        values.push(value);
    }

    Ok(CoordinateSet::try_from(values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use stabrs_core::models::Interval;
    use stabrs_segtree::SegTreeError;

    #[rstest]
    fn test_points_cache_round_trip() {
        let coords = CoordinateSet::from_intervals(vec![
            Interval::new(100, 107),
            Interval::new(-5, 3),
            Interval::new(3, 100),
        ]);

        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("cache/distinct_points.txt");

        coords.write_points(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "-5\n3\n100\n107\n"
        );

        let back = read_points(&path).unwrap();
        assert_eq!(back, coords);
    }

    #[rstest]
    fn test_read_points_skips_blank_lines() {
        let data = "1\n\n4\n  9  \n";
        let coords = read_points_from(data.as_bytes()).unwrap();
        assert_eq!(coords.as_slice(), &[1, 4, 9]);
    }

    #[rstest]
    fn test_read_points_rejects_garbage() {
        let data = "1\nfour\n";
        let result = read_points_from(data.as_bytes());
        match result {
            Err(StabIoError::InvalidPointsCache { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "four");
            }
            other => panic!("expected an invalid points cache error, got {:?}", other),
        }
    }

    #[rstest]
    fn test_read_points_rejects_unsorted() {
        let data = "1\n9\n4\n";
        let result = read_points_from(data.as_bytes());
        assert!(matches!(
            result,
            Err(StabIoError::SegTree(SegTreeError::UnsortedCoordinates { .. }))
        ));
    }
}
