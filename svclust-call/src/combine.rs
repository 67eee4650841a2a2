use std::collections::{BTreeMap, BTreeSet};

use svclust_cluster::{Anchor, consensus_kind, link_components};
use svclust_core::models::{Cluster, ClusterId, Locus, PartitionKey, VariantKind};

///
/// A merged group of clusters, not yet genotyped.
///
#[derive(Debug, Clone, PartialEq)]
pub struct CallCandidate {
    pub key: PartitionKey,
    pub locus: Locus,
    pub kind: VariantKind,
    pub reads: BTreeSet<String>,
    pub std_span: f64,
    pub std_pos: f64,
    pub clusters: Vec<ClusterId>,
}

impl CallCandidate {
    /// Number of distinct supporting reads over all merged clusters.
    pub fn support(&self) -> usize {
        self.reads.len()
    }
}

///
/// Merge clusters of all evidence passes that describe the same event.
///
/// Clusters with the same partition key are linked with the same nearby rule as
/// signatures, applied to their consensus. Each connected group becomes one
/// candidate: positions and payload are the median of the member consensus values,
/// the read set is the union of member reads and the spread is the mean of member
/// spreads. Candidates below `min_support` are dropped.
///
pub fn combine_clusters(clusters: &[Cluster], d_max: u32, min_support: usize) -> Vec<CallCandidate> {
    let mut by_key: BTreeMap<&PartitionKey, Vec<&Cluster>> = BTreeMap::new();
    for cluster in clusters {
        by_key.entry(cluster.key()).or_default().push(cluster);
    }

    let mut candidates: Vec<CallCandidate> = Vec::new();
    for (key, mut members) in by_key {
        members.sort_by(|a, b| {
            (Anchor::from(a.consensus()), a.id()).cmp(&(Anchor::from(b.consensus()), b.id()))
        });
        let anchors: Vec<Anchor> = members.iter().map(|c| Anchor::from(c.consensus())).collect();

        for group in link_components(&anchors, d_max) {
            let group: Vec<&Cluster> = group.into_iter().map(|i| members[i]).collect();
            let candidate = merge_group(key, &group);
            if candidate.support() >= min_support {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

fn merge_group(key: &PartitionKey, group: &[&Cluster]) -> CallCandidate {
    let records: Vec<(u32, u32, &VariantKind)> = group
        .iter()
        .map(|c| (c.locus().start, c.locus().end, c.kind()))
        .collect();
    let (locus, kind) = consensus_kind(key, &records);

    let reads: BTreeSet<String> = group
        .iter()
        .flat_map(|c| c.reads().iter().cloned())
        .collect();

    let n = group.len().max(1) as f64;
    let std_span = group.iter().map(|c| c.std_span()).sum::<f64>() / n;
    let std_pos = group.iter().map(|c| c.std_pos()).sum::<f64>() / n;

    let mut clusters: Vec<ClusterId> = group.iter().map(|c| c.id().clone()).collect();
    clusters.sort();

    CallCandidate {
        key: key.clone(),
        locus,
        kind,
        reads,
        std_span,
        std_pos,
        clusters,
    }
}
