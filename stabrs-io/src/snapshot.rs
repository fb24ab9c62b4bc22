//! Versioned binary snapshot of a built [`SegmentTree`].
//!
//! Layout, all little endian:
//!
//! | field          | size          |
//! |----------------|---------------|
//! | magic `STAB`   | 4 bytes       |
//! | version        | u32           |
//! | n coordinates  | u64           |
//! | leaf offset    | u64           |
//! | n nodes        | u64 (= 2n)    |
//! | coordinates    | n x i64       |
//! | node counts    | 2n x u32      |
//! | closing counts | n x u32       |
//!
//! Restoring a snapshot gives a tree that answers every query exactly like a fresh build.
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use stabrs_segtree::{CoordinateSet, SegmentTree};

use crate::consts::{SNAPSHOT_HEADER_LEN, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use crate::error::{Result, StabIoError};

// cap on up-front allocations driven by header values
const MAX_PREALLOC: usize = 1 << 20;

pub trait SnapshotWrite {
    ///
    /// Persist the tree to disk in the snapshot format.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_snapshot<T: AsRef<Path>>(&self, path: T) -> Result<()>;

    /// Same as [`SnapshotWrite::write_snapshot`] for any writer.
    fn write_snapshot_to<W: Write>(&self, writer: W) -> Result<()>;
}

impl SnapshotWrite for SegmentTree {
    fn write_snapshot<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.write_snapshot_to(BufWriter::new(file))
    }

    fn write_snapshot_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let coords = self.coordinates();

        writer.write_all(SNAPSHOT_MAGIC)?;
        writer.write_u32::<LittleEndian>(SNAPSHOT_VERSION)?;
        writer.write_u64::<LittleEndian>(coords.len() as u64)?;
        writer.write_u64::<LittleEndian>(self.leaf_offset() as u64)?;
        writer.write_u64::<LittleEndian>(self.nodes().len() as u64)?;

        for &c in coords {
            writer.write_i64::<LittleEndian>(c)?;
        }
        for &count in self.nodes() {
            writer.write_u32::<LittleEndian>(count)?;
        }
        for &count in self.closing() {
            writer.write_u32::<LittleEndian>(count)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Size in bytes of a snapshot holding `n` coordinates.
pub fn snapshot_len(n: u64) -> u64 {
    // 8 bytes per coordinate, 2 x 4 bytes of node counts, 4 bytes of closing count
    n.saturating_mul(8 + 2 * 4 + 4)
        .saturating_add(SNAPSHOT_HEADER_LEN)
}

fn truncated(what: &str) -> impl Fn(std::io::Error) -> StabIoError + '_ {
    move |e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            StabIoError::CorruptedSnapshot(format!("file ends in the middle of the {}", what))
        }
        _ => StabIoError::Io(e),
    }
}

fn read_u32_vec<R: Read>(reader: &mut R, len: usize, what: &str) -> Result<Vec<u32>> {
    let mut values = Vec::with_capacity(len.min(MAX_PREALLOC));
    for _ in 0..len {
        values.push(reader.read_u32::<LittleEndian>().map_err(truncated(what))?);
    }
    Ok(values)
}

struct Header {
    n: usize,
    leaf_offset: usize,
}

fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut magic = [0; 4];
    reader
        .read_exact(&mut magic)
        .map_err(|_| StabIoError::InvalidSnapshot)?;
    if &magic != SNAPSHOT_MAGIC {
        return Err(StabIoError::InvalidSnapshot);
    }

    let version = reader
        .read_u32::<LittleEndian>()
        .map_err(truncated("header"))?;
    if version != SNAPSHOT_VERSION {
        return Err(StabIoError::UnsupportedSnapshotVersion(version));
    }

    let n = reader
        .read_u64::<LittleEndian>()
        .map_err(truncated("header"))?;
    let leaf_offset = reader
        .read_u64::<LittleEndian>()
        .map_err(truncated("header"))?;
    let n_nodes = reader
        .read_u64::<LittleEndian>()
        .map_err(truncated("header"))?;

    if n.checked_mul(2) != Some(n_nodes) {
        return Err(StabIoError::CorruptedSnapshot(format!(
            "{} nodes recorded for {} coordinates",
            n_nodes, n
        )));
    }

    let n = usize::try_from(n)
        .map_err(|_| StabIoError::CorruptedSnapshot(format!("{} coordinates is too many", n)))?;
    let leaf_offset = usize::try_from(leaf_offset).map_err(|_| {
        StabIoError::CorruptedSnapshot(format!("leaf offset {} is out of range", leaf_offset))
    })?;

    Ok(Header { n, leaf_offset })
}

fn read_body<R: Read>(reader: &mut R, header: Header) -> Result<SegmentTree> {
    let n = header.n;

    let mut values = Vec::with_capacity(n.min(MAX_PREALLOC));
    for _ in 0..n {
        values.push(
            reader
                .read_i64::<LittleEndian>()
                .map_err(truncated("coordinates"))?,
        );
    }
    let nodes = read_u32_vec(reader, 2 * n, "node counts")?;
    let closing = read_u32_vec(reader, n, "closing counts")?;

    let mut rest = [0u8; 1];
    if reader.read(&mut rest)? != 0 {
        return Err(StabIoError::CorruptedSnapshot(
            "unexpected bytes after the closing counts".to_string(),
        ));
    }

    let coords = CoordinateSet::try_from(values)?;
    Ok(SegmentTree::from_parts(
        coords,
        nodes,
        closing,
        header.leaf_offset,
    )?)
}

///
/// Load a snapshot written by [`SnapshotWrite`].
///
/// The file size is checked against the header before the body is read.
///
pub fn read_snapshot<T: AsRef<Path>>(path: T) -> Result<SegmentTree> {
    let file = File::open(path.as_ref())?;
    let actual_len = file.metadata()?.len();

    let mut reader = BufReader::new(file);
    let header = read_header(&mut reader)?;

    let expected_len = snapshot_len(header.n as u64);
    if actual_len != expected_len {
        return Err(StabIoError::CorruptedSnapshot(format!(
            "expected {} bytes, file has {}",
            expected_len, actual_len
        )));
    }

    read_body(&mut reader, header)
}

pub fn read_snapshot_from<R: Read>(mut reader: R) -> Result<SegmentTree> {
    let header = read_header(&mut reader)?;
    read_body(&mut reader, header)
}
