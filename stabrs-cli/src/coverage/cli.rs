use clap::{Arg, Command};

pub const COVERAGE_CMD: &str = "coverage";

pub fn create_coverage_cli() -> Command {
    Command::new(COVERAGE_CMD)
        .author("Databio")
        .about("Compute the coverage table for a reads file and a loci file in one go.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML run config. The other flags override its values"),
        )
        .arg(Arg::new("reads").long("reads").help("CSV file of reads"))
        .arg(Arg::new("loci").long("loci").help("CSV file of positions"))
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Where to write the coverage table (stdout if omitted)"),
        )
        .arg(
            Arg::new("points-cache")
                .long("points-cache")
                .help("Distinct points cache to read or write"),
        )
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .help("Tree snapshot to restore from, or to write after building"),
        )
        .arg(
            Arg::new("backend")
                .short('e')
                .long("backend")
                .value_parser(["segtree", "naive"])
                .default_value("segtree")
                .help("Which backend answers the queries"),
        )
}
