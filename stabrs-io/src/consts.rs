// snapshot stuff
pub const SNAPSHOT_MAGIC: &[u8; 4] = b"STAB";
pub const SNAPSHOT_VERSION: u32 = 1;

// fixed-size part of a snapshot: magic, version, n coordinates, leaf offset, n nodes
pub const SNAPSHOT_HEADER_LEN: u64 = 4 + 4 + 8 + 8 + 8;

// defaults
pub const DEFAULT_SNAPSHOT: &str = "segment_tree.stab";

pub const PROGRESS_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}";
