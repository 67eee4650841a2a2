use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use svclust_call::{DepthProvider, DepthTable, NoDepth, call_structural_variants};
use svclust_io::{BedWrite, CallSet, VcfHeader, VcfWrite, write_cluster_beds};
use svclust_stats::write_statistics;

use crate::common::{
    emit_diagnostics, init_thread_pool, load_config, load_reference, load_stores, spinner,
};

pub fn run_call(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    init_thread_pool(config.threads)?;

    let reference = load_reference(matches)?;
    let stores = load_stores(matches)?;

    let depth: Box<dyn DepthProvider> = match matches.get_one::<String>("depth") {
        Some(path) => Box::new(
            DepthTable::try_from(Path::new(path))
                .with_context(|| format!("Failed to load depth file: {}", path))?,
        ),
        None => {
            log::info!("No --depth provided, genotypes will be unknown.");
            Box::new(NoDepth)
        }
    };

    let pb = spinner(&format!(
        "Calling structural variants from {} evidence passes",
        stores.len()
    ));
    let report = call_structural_variants(&stores, &config, depth.as_ref());
    pb.finish_and_clear();
    let report = report?;

    emit_diagnostics(&report.diagnostics);

    let set = CallSet::assemble(report.calls, &reference);
    log::info!(
        "{} calls from {} clusters",
        set.len(),
        report.clusters.len()
    );

    let working_dir = &config.working_dir;
    let bed_path = working_dir.join("calls.bed");
    let vcf_path = working_dir.join("calls.vcf");
    set.write_bed(&bed_path)
        .with_context(|| format!("Failed to write {}", bed_path.display()))?;
    set.write_vcf(
        &vcf_path,
        &VcfHeader::new(&config.sample_id, config.aligner.as_str()),
    )
    .with_context(|| format!("Failed to write {}", vcf_path.display()))?;

    if config.write_cluster_beds {
        write_cluster_beds(&working_dir.join("signatures"), &report.clusters, &stores)
            .context("Failed to write the cluster BED files")?;
    }

    if config.write_histograms {
        write_statistics(&working_dir.join("histograms"), set.calls(), config.histogram_bins)
            .context("Failed to write histograms")?;
    }

    log::info!("Output written to {}", working_dir.display());
    Ok(())
}
