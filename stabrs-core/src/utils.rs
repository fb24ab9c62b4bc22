use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

///
/// Check whether a path points at a gzip'd file, judging by its extension.
///
pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Get a writer for a file path, gzip'd when the path ends in `.gz`, or stdout.
///
/// # Arguments
///
/// - path: path to write to. `None` or `-` writes to stdout.
///
pub fn get_dynamic_writer(path: Option<&Path>) -> Result<BufWriter<Box<dyn Write>>> {
    let inner: Box<dyn Write> = match path {
        None => Box::new(std::io::stdout()),
        Some(p) if p == Path::new("-") => Box::new(std::io::stdout()),
        Some(p) => {
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create parent directories for {:?}", p)
                    })?;
                }
            }
            let file =
                File::create(p).with_context(|| format!("Failed to create file: {:?}", p))?;
            match is_gzipped(p) {
                true => Box::new(GzEncoder::new(file, Compression::default())),
                false => Box::new(file),
            }
        }
    };

    Ok(BufWriter::new(inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::BufRead;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_gz_round_trip_through_dynamic_reader_and_writer() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("nested/out.csv.gz");

        {
            let mut writer = get_dynamic_writer(Some(path.as_path())).unwrap();
            writeln!(writer, "position").unwrap();
            writeln!(writer, "42").unwrap();
            writer.flush().unwrap();
        }

        let reader = get_dynamic_reader(path.as_path()).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["position".to_string(), "42".to_string()]);
    }

    #[rstest]
    fn test_plain_file_reader() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("plain.txt");
        std::fs::write(&path, "1\n2\n").unwrap();

        let reader = get_dynamic_reader(path.as_path()).unwrap();
        assert_eq!(reader.lines().count(), 2);
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let result = get_dynamic_reader(Path::new("does/not/exist.csv"));
        assert!(result.is_err());
    }

    #[rstest]
    #[case("reads.csv.gz", true)]
    #[case("reads.csv", false)]
    #[case("gz", false)]
    fn test_is_gzipped(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_gzipped(Path::new(path)), expected);
    }
}
