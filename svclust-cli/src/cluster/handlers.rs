use anyhow::{Context, Result};
use clap::ArgMatches;

use svclust_call::cluster_signatures;
use svclust_io::{CallSet, VcfHeader, VcfWrite, write_cluster_beds};
use svclust_stats::write_statistics;

use crate::common::{
    emit_diagnostics, init_thread_pool, load_config, load_reference, load_stores, spinner,
};

pub fn run_cluster(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    init_thread_pool(config.threads)?;

    let reference = load_reference(matches)?;
    let stores = load_stores(matches)?;

    let pb = spinner(&format!("Clustering {} evidence passes", stores.len()));
    let report = cluster_signatures(&stores, &config);
    pb.finish_and_clear();
    let report = report?;

    emit_diagnostics(&report.diagnostics);
    for (pass, strategy) in &report.strategies {
        log::debug!("Pass '{}' scanned {:?}", pass, strategy);
    }
    log::info!("{} clusters", report.clusters.len());

    let out_dir = config.working_dir.join("signatures");
    write_cluster_beds(&out_dir, &report.clusters, &stores)
        .context("Failed to write the cluster BED files")?;

    let set = CallSet::assemble(report.cluster_calls(&config.quality), &reference);
    let vcf_path = out_dir.join("all.vcf");
    set.write_vcf(
        &vcf_path,
        &VcfHeader::new(&config.sample_id, config.aligner.as_str()),
    )
    .with_context(|| format!("Failed to write {}", vcf_path.display()))?;

    if config.write_histograms {
        write_statistics(
            &out_dir.join("histograms"),
            report.clusters.as_slice(),
            config.histogram_bins,
        )
        .context("Failed to write histograms")?;
    }

    log::info!("Output written to {}", out_dir.display());
    Ok(())
}
