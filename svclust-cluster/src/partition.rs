use rayon::prelude::*;

use svclust_core::models::{Cluster, ClusterId, PartitionKey, SignatureId, SignatureStore};

use crate::consensus::build_cluster;
use crate::linkage::{Anchor, link_components};

///
/// Split the signatures of one partition into groups of linked records.
///
/// Records are ordered by position first, with the read id and partner interval as
/// tie-breakers, so the groups and their member order do not depend on the order
/// signatures were inserted in.
///
pub fn cluster_partition(
    store: &SignatureStore,
    ids: &[SignatureId],
    d_max: u32,
) -> Vec<Vec<SignatureId>> {
    let mut sorted: Vec<SignatureId> = ids.to_vec();
    sorted.sort_by(|a, b| {
        let (sa, sb) = (&store[*a], &store[*b]);
        (sa.start, sa.end, sa.kind.partner_interval(), &sa.read, a).cmp(&(
            sb.start,
            sb.end,
            sb.kind.partner_interval(),
            &sb.read,
            b,
        ))
    });

    let anchors: Vec<Anchor> = sorted.iter().map(|id| Anchor::from(&store[*id])).collect();

    link_components(&anchors, d_max)
        .into_iter()
        .map(|group| group.into_iter().map(|i| sorted[i]).collect())
        .collect()
}

///
/// Cluster every partition of a store and build the cluster consensus.
///
/// Partitions are processed on the rayon pool and collected back in partition-key
/// order. Groups with fewer distinct reads than `min_support` are dropped. Cluster
/// indices are assigned after filtering, in output order.
///
pub fn cluster_store(store: &SignatureStore, d_max: u32, min_support: usize) -> Vec<Cluster> {
    let partitions: Vec<(PartitionKey, Vec<SignatureId>)> = store.partitions().into_iter().collect();

    let grouped: Vec<(PartitionKey, Vec<Vec<SignatureId>>)> = partitions
        .par_iter()
        .map(|(key, ids)| (key.clone(), cluster_partition(store, ids, d_max)))
        .collect();

    let mut clusters: Vec<Cluster> = Vec::new();
    for (key, groups) in grouped {
        let before = clusters.len();
        for members in groups {
            let id = ClusterId {
                pass: store.name.clone(),
                index: clusters.len(),
            };
            if let Some(cluster) = build_cluster(store, id, &key, members, min_support) {
                clusters.push(cluster);
            }
        }
        log::debug!(
            "Partition {} of pass '{}': {} clusters",
            key,
            store.name,
            clusters.len() - before
        );
    }

    clusters
}
