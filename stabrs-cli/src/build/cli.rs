use clap::{Arg, Command};

use stabrs_io::consts::DEFAULT_SNAPSHOT;

pub const BUILD_CMD: &str = "build";

pub fn create_build_cli() -> Command {
    Command::new(BUILD_CMD)
        .author("Databio")
        .about("Build a segment tree from a reads file and save a snapshot of it.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("reads")
                .long("reads")
                .required(true)
                .help("CSV file of reads with `start` and `length` columns (may be gzip'd)"),
        )
        .arg(
            Arg::new("points-cache")
                .long("points-cache")
                .help("Distinct points cache to read, or to write if it doesn't exist yet"),
        )
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .default_value(DEFAULT_SNAPSHOT)
                .help("Where to write the tree snapshot"),
        )
}
