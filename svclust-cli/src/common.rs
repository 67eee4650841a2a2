use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, arg};
use indicatif::{ProgressBar, ProgressStyle};

use svclust_core::Diagnostic;
use svclust_core::RunConfig;
use svclust_core::config::Aligner;
use svclust_core::models::{ReferenceMetadata, SignatureStore};
use svclust_core::utils::pass_name_from_path;

/// Arguments shared by `call` and `cluster`.
pub fn add_run_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("signatures")
                .long("signatures")
                .required(true)
                .num_args(1..)
                .help("Signature files, one per evidence pass (.tsv or .tsv.gz)"),
        )
        .arg(
            arg!(--reference <FAI>)
                .required(true)
                .help("Reference .fai index or chrom.sizes file (defines contig order)"),
        )
        .arg(
            arg!(--depth <BED>)
                .required(false)
                .help("Read depth per window (chr start end depth), enables genotyping"),
        )
        .arg(
            arg!(--config <TOML>)
                .required(false)
                .help("Run configuration in TOML. Command line options take precedence"),
        )
        .arg(
            Arg::new("working-dir")
                .long("working-dir")
                .required(false)
                .help("Output directory"),
        )
        .arg(
            arg!(--sample <SAMPLE>)
                .required(false)
                .help("Sample id written to the VCF header"),
        )
        .arg(
            Arg::new("max-distance")
                .long("max-distance")
                .required(false)
                .help("Maximum linking distance between signatures (default 500, 1000 with --nanopore)"),
        )
        .arg(
            Arg::new("min-support")
                .long("min-support")
                .required(false)
                .help("Minimum number of supporting reads per cluster"),
        )
        .arg(
            arg!(--threads <THREADS>)
                .required(false)
                .help("Number of worker threads"),
        )
        .arg(
            arg!(--aligner <ALIGNER>)
                .required(false)
                .help("Aligner that produced the alignments (ngmlr or minimap2)"),
        )
        .arg(
            Arg::new("nanopore")
                .long("nanopore")
                .action(ArgAction::SetTrue)
                .help("Input comes from nanopore reads"),
        )
        .arg(
            Arg::new("no-histograms")
                .long("no-histograms")
                .action(ArgAction::SetTrue)
                .help("Skip the size and support histograms"),
        )
}

fn parse_arg<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>> {
    matches
        .get_one::<String>(name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| anyhow::anyhow!("--{} must be a non-negative integer, got '{}'", name, value))
        })
        .transpose()
}

///
/// Build the run configuration: the `--config` file (or defaults) with every
/// option given on the command line applied on top.
///
pub fn load_config(matches: &ArgMatches) -> Result<RunConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => RunConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => RunConfig::default(),
    };

    if let Some(dir) = matches.get_one::<String>("working-dir") {
        config.working_dir = PathBuf::from(dir);
    }
    if let Some(sample) = matches.get_one::<String>("sample") {
        config.sample_id = sample.clone();
    }
    if let Some(distance) = parse_arg::<u32>(matches, "max-distance")? {
        config.max_distance = Some(distance);
    }
    if let Some(min_support) = parse_arg::<usize>(matches, "min-support")? {
        config.min_support = min_support;
    }
    if let Some(threads) = parse_arg::<usize>(matches, "threads")? {
        config.threads = threads;
    }
    if let Some(aligner) = matches.get_one::<String>("aligner") {
        config.aligner = aligner.parse::<Aligner>()?;
    }
    if matches.get_flag("nanopore") {
        config.nanopore = true;
    }
    if matches.get_flag("no-histograms") {
        config.write_histograms = false;
    }

    config.validate().context("Invalid run configuration")?;
    Ok(config)
}

pub fn init_thread_pool(threads: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to set up the worker thread pool")
}

///
/// Pass names taken from the file names. Names that occur more than once get
/// the 1-based input position appended, `reads_1` / `reads_2`.
///
pub fn unique_pass_names(paths: &[&str]) -> Vec<String> {
    let names: Vec<String> = paths
        .iter()
        .map(|p| pass_name_from_path(Path::new(p)))
        .collect();
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if names.iter().filter(|n| *n == name).count() > 1 {
                format!("{}_{}", name, i + 1)
            } else {
                name.clone()
            }
        })
        .collect()
}

pub fn load_stores(matches: &ArgMatches) -> Result<Vec<SignatureStore>> {
    let paths: Vec<&str> = matches
        .get_many::<String>("signatures")
        .context("--signatures is required")?
        .map(String::as_str)
        .collect();

    paths
        .iter()
        .zip(unique_pass_names(&paths))
        .map(|(path, name)| {
            SignatureStore::from_path(Path::new(path), &name)
                .with_context(|| format!("Failed to load signature file: {}", path))
        })
        .collect()
}

pub fn load_reference(matches: &ArgMatches) -> Result<ReferenceMetadata> {
    let path = matches
        .get_one::<String>("reference")
        .context("--reference is required")?;
    ReferenceMetadata::try_from(Path::new(path))
        .with_context(|| format!("Failed to load reference metadata: {}", path))
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

pub fn emit_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        diagnostic.emit();
    }
    let warnings = diagnostics
        .iter()
        .filter(|d| d.level() == log::Level::Warn)
        .count();
    if warnings > 0 {
        log::info!("{} warnings reported", warnings);
    }
}
