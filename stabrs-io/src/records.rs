use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::de::DeserializeOwned;

use stabrs_core::consts::{
    COVERAGE_COL_NAME, LENGTH_COL_NAME, POSITION_COL_NAME, START_COL_NAME,
};
use stabrs_core::errors::RecordError;
use stabrs_core::models::{Coverage, Locus, Read};
use stabrs_core::utils::{get_dynamic_reader, get_dynamic_writer};

use crate::error::Result;

fn require_columns(headers: &StringRecord, columns: &[&str], source_name: &str) -> Result<()> {
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(RecordError::MissingColumn {
                column: column.to_string(),
                source_name: source_name.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn read_records<T, R>(reader: R, columns: &[&str], source_name: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: io::Read,
{
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    require_columns(&headers, columns, source_name)?;

    let mut records = Vec::new();
    for result in rdr.deserialize::<T>() {
        let record = result.map_err(|e| RecordError::Malformed {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

///
/// Read sequencing reads from a CSV stream with a header that has (at least) the
/// columns `start` and `length`. Other columns are ignored.
///
pub fn read_reads<R: io::Read>(reader: R) -> Result<Vec<Read>> {
    read_records(reader, &[START_COL_NAME, LENGTH_COL_NAME], "reads")
}

/// Like [`read_reads`], from a plain or gzip'd file.
pub fn read_reads_from_path(path: &Path) -> Result<Vec<Read>> {
    let reader = get_dynamic_reader(path)?;
    read_records(
        reader,
        &[START_COL_NAME, LENGTH_COL_NAME],
        &path.display().to_string(),
    )
}

///
/// Read the positions to query from a CSV stream with a `position` column.
///
pub fn read_loci<R: io::Read>(reader: R) -> Result<Vec<Locus>> {
    read_records(reader, &[POSITION_COL_NAME], "loci")
}

pub fn read_loci_from_path(path: &Path) -> Result<Vec<Locus>> {
    let reader = get_dynamic_reader(path)?;
    read_records(reader, &[POSITION_COL_NAME], &path.display().to_string())
}

///
/// Write a `position,coverage` table. The header is always written, even for
/// zero rows, and rows keep the order they were given in.
///
pub fn write_coverage<W: io::Write>(writer: W, coverage: &[Coverage]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record([POSITION_COL_NAME, COVERAGE_COL_NAME])?;
    for row in coverage {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Write the coverage table to a file (gzip'd if it ends in `.gz`), or stdout for `None`.
pub fn write_coverage_to_path(path: Option<&Path>, coverage: &[Coverage]) -> Result<()> {
    let writer = get_dynamic_writer(path)?;
    write_coverage(writer, coverage)
}
