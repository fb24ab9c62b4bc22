mod build;
mod coverage;
mod query;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use simple_logger::SimpleLogger;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "stabrs";

    pub const VERBOSE_FLAG: &str = "verbose";
    pub const QUIET_FLAG: &str = "quiet";
    pub const PROGRESS_FLAG: &str = "progress";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Read coverage at arbitrary genomic positions, answered with a stab-query segment tree.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::VERBOSE_FLAG)
                .short('v')
                .long(consts::VERBOSE_FLAG)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log debug messages"),
        )
        .arg(
            Arg::new(consts::QUIET_FLAG)
                .short('q')
                .long(consts::QUIET_FLAG)
                .action(ArgAction::SetTrue)
                .global(true)
                .conflicts_with(consts::VERBOSE_FLAG)
                .help("Only log warnings and errors"),
        )
        .arg(
            Arg::new(consts::PROGRESS_FLAG)
                .long(consts::PROGRESS_FLAG)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Show a progress bar while inserting reads"),
        )
        .subcommand(build::cli::create_build_cli())
        .subcommand(query::cli::create_query_cli())
        .subcommand(coverage::cli::create_coverage_cli())
}

fn log_level(matches: &ArgMatches) -> LevelFilter {
    if matches.get_flag(consts::VERBOSE_FLAG) {
        LevelFilter::Debug
    } else if matches.get_flag(consts::QUIET_FLAG) {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    SimpleLogger::new()
        .with_utc_timestamps()
        .with_level(log_level(&matches))
        .init()?;

    match matches.subcommand() {
        //
        // BUILD
        //
        Some((build::cli::BUILD_CMD, matches)) => {
            build::handlers::run_build(matches)?;
        }

        //
        // QUERY
        //
        Some((query::cli::QUERY_CMD, matches)) => {
            query::handlers::run_query(matches)?;
        }

        //
        // COVERAGE
        //
        Some((coverage::cli::COVERAGE_CMD, matches)) => {
            coverage::handlers::run_coverage(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
