use std::collections::BTreeSet;

use svclust_cluster::cluster_store;
use svclust_core::errors::{Result, SvClustError};
use svclust_core::models::{Call, Cluster, ScanStrategy, SignatureStore, SortOrder};
use svclust_core::config::QualityConfig;
use svclust_core::models::Genotype;
use svclust_core::{Diagnostic, RunConfig};

use crate::combine::combine_clusters;
use crate::depth::DepthProvider;
use crate::genotype::{genotype_candidate, quality};

/// Clusters of every evidence pass.
#[derive(Debug, Clone, Default)]
pub struct ClusterReport {
    pub clusters: Vec<Cluster>,
    pub diagnostics: Vec<Diagnostic>,
    /// Scan strategy of each pass, in input order.
    pub strategies: Vec<(String, ScanStrategy)>,
}

impl ClusterReport {
    ///
    /// Every cluster as an ungenotyped [`Call`], for the per-pass cluster VCF.
    /// Quality is scored from the cluster support alone.
    ///
    pub fn cluster_calls(&self, scoring: &QualityConfig) -> Vec<Call> {
        self.clusters
            .iter()
            .map(|cluster| {
                let locus = cluster.locus();
                Call {
                    id: None,
                    chr: locus.chr.clone(),
                    start: locus.start,
                    end: locus.end,
                    kind: cluster.kind().clone(),
                    genotype: Genotype::Unknown,
                    support: cluster.support(),
                    depth: None,
                    quality: quality(cluster.support(), scoring),
                    std_span: cluster.std_span(),
                    std_pos: cluster.std_pos(),
                    clusters: vec![cluster.id().clone()],
                }
            })
            .collect()
    }
}

/// Result of a full calling run. Calls are not yet ordered or numbered.
#[derive(Debug, Clone, Default)]
pub struct CallReport {
    pub calls: Vec<Call>,
    pub clusters: Vec<Cluster>,
    pub diagnostics: Vec<Diagnostic>,
    pub strategies: Vec<(String, ScanStrategy)>,
}

///
/// Check the input, then cluster each evidence pass.
///
/// Fails with [`InputOrder`](svclust_core::SvClustError::InputOrder) before any
/// clustering when a pass has no usable sort order, and with
/// [`DuplicatePass`](svclust_core::SvClustError::DuplicatePass) when two passes
/// share a name (cluster ids would collide).
///
pub fn cluster_signatures(stores: &[SignatureStore], config: &RunConfig) -> Result<ClusterReport> {
    config.validate()?;

    let mut names: BTreeSet<&str> = BTreeSet::new();
    for store in stores {
        if !names.insert(store.name.as_str()) {
            return Err(SvClustError::DuplicatePass(store.name.clone()));
        }
    }

    let mut report = ClusterReport::default();
    for store in stores {
        let strategy = store.scan_strategy()?;
        if store.sort_order == Some(SortOrder::Coordinate) {
            report.diagnostics.push(Diagnostic::DegradedSortOrder {
                pass: store.name.clone(),
            });
        }
        report.strategies.push((store.name.clone(), strategy));
    }

    for store in stores {
        report.diagnostics.extend(store.diagnostics().iter().cloned());
    }

    if stores.iter().all(|s| s.is_empty()) {
        report.diagnostics.push(Diagnostic::EmptyEvidence);
        return Ok(report);
    }

    let d_max = config.max_distance();
    for store in stores {
        let clusters = cluster_store(store, d_max, config.min_support);
        log::debug!(
            "Pass '{}': {} signatures in {} clusters",
            store.name,
            store.len(),
            clusters.len()
        );
        report.clusters.extend(clusters);
    }

    Ok(report)
}

///
/// Run the whole calling pipeline: cluster every pass, merge clusters across
/// passes and genotype the merged candidates.
///
/// # Arguments
/// - stores: one signature store per evidence pass
/// - config: run configuration
/// - depth: read depth source used for genotyping
///
pub fn call_structural_variants(
    stores: &[SignatureStore],
    config: &RunConfig,
    depth: &dyn DepthProvider,
) -> Result<CallReport> {
    let ClusterReport {
        clusters,
        mut diagnostics,
        strategies,
    } = cluster_signatures(stores, config)?;

    let candidates = combine_clusters(&clusters, config.max_distance(), config.min_support);
    log::debug!(
        "Combined {} clusters into {} candidates",
        clusters.len(),
        candidates.len()
    );

    let mut calls = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let (call, diagnostic) =
            genotype_candidate(candidate, depth, &config.genotyping, &config.quality);
        diagnostics.extend(diagnostic);
        calls.push(call);
    }

    Ok(CallReport {
        calls,
        clusters,
        diagnostics,
        strategies,
    })
}
