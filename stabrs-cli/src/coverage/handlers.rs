use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use log::info;

use stabrs_io::{StabConfig, pipeline};
use stabrs_segtree::StabberType;

use crate::consts::PROGRESS_FLAG;

///
/// Put together the run config: start from `--config` if given, then let
/// the individual flags override it.
///
pub fn config_from_matches(matches: &ArgMatches) -> Result<StabConfig> {
    let reads = matches.get_one::<String>("reads");
    let loci = matches.get_one::<String>("loci");

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => StabConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => match (reads, loci) {
            (Some(reads), Some(loci)) => StabConfig::new(reads, loci),
            _ => bail!("Both --reads and --loci are required when no --config is given."),
        },
    };

    if let Some(reads) = reads {
        config.reads = reads.into();
    }
    if let Some(loci) = loci {
        config.loci = loci.into();
    }
    if let Some(output) = matches.get_one::<String>("output") {
        config = config.with_output(output);
    }
    if let Some(points_cache) = matches.get_one::<String>("points-cache") {
        config = config.with_points_cache(points_cache);
    }
    if let Some(snapshot) = matches.get_one::<String>("snapshot") {
        config = config.with_snapshot(snapshot);
    }

    Ok(config)
}

pub fn run_coverage(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;

    let backend = matches
        .get_one::<String>("backend")
        .map(|b| StabberType::from_str(b))
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();

    let progress = matches.get_flag(PROGRESS_FLAG);

    let start = Instant::now();
    let coverage = pipeline::run(&config, backend, progress)?;

    info!(
        "Computed coverage for {} loci in {:.2?}",
        coverage.len(),
        start.elapsed()
    );

    Ok(())
}
