use clap::{Arg, Command};

use stabrs_io::consts::DEFAULT_SNAPSHOT;

pub const QUERY_CMD: &str = "query";

pub fn create_query_cli() -> Command {
    Command::new(QUERY_CMD)
        .author("Databio")
        .about("Get the coverage at a list of positions from a saved tree snapshot.")
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .default_value(DEFAULT_SNAPSHOT)
                .help("Tree snapshot written by `stabrs build`"),
        )
        .arg(
            Arg::new("loci")
                .long("loci")
                .required(true)
                .help("CSV file of positions with a `position` column"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Where to write the coverage table (stdout if omitted, gzip'd if it ends in .gz)"),
        )
}
