//! Per-type BED dump of signature clusters, one file per variant class.
//!
//! Each line is `chr  start  end  type;size;std_span;std_pos  support  members`,
//! where members are the compact signature records joined by `||`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use svclust_core::models::{Cluster, SignatureStore, VariantKind};

use crate::error::{OutputError, Result};

pub const CLUSTER_BED_FILES: [&str; 7] = [
    "del.bed",
    "ins.bed",
    "inv.bed",
    "dup_tan_source.bed",
    "dup_tan_dest.bed",
    "trans.bed",
    "ins_dup.bed",
];

fn cluster_lines(cluster: &Cluster, members: &str) -> Vec<(&'static str, String)> {
    let locus = cluster.locus();
    let short_name = cluster.variant_type().short_name();
    let size = cluster
        .size()
        .map(|s| s.to_string())
        .unwrap_or_else(|| ".".to_string());
    let name = format!(
        "{};{};{:.2};{:.2}",
        short_name,
        size,
        cluster.std_span(),
        cluster.std_pos()
    );
    let line = |chr: &str, start: u32, end: u32| {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            chr,
            start,
            end,
            name,
            cluster.support(),
            members
        )
    };

    match cluster.kind() {
        VariantKind::Deletion => vec![("del.bed", line(&locus.chr, locus.start, locus.end))],
        VariantKind::Inversion { .. } => vec![("inv.bed", line(&locus.chr, locus.start, locus.end))],
        VariantKind::Insertion { .. } => {
            vec![("ins.bed", line(&locus.chr, locus.start, locus.start + 1))]
        }
        VariantKind::TandemDuplication { .. } => {
            let inserted = cluster.size().unwrap_or(0);
            vec![
                (
                    "dup_tan_source.bed",
                    line(&locus.chr, locus.start, locus.end),
                ),
                (
                    "dup_tan_dest.bed",
                    line(&locus.chr, locus.end, locus.end.saturating_add(inserted)),
                ),
            ]
        }
        VariantKind::Translocation { mate, .. } => vec![
            ("trans.bed", line(&locus.chr, locus.start, locus.start + 1)),
            ("trans.bed", line(&mate.chr, mate.pos, mate.pos + 1)),
        ],
        VariantKind::InsertionFrom { .. } => {
            vec![("ins_dup.bed", line(&locus.chr, locus.start, locus.start + 1))]
        }
    }
}

///
/// Write the cluster dump into `dir`, creating every per-type file even when it
/// stays empty. Returns the paths written.
///
/// # Arguments
/// - dir: output directory
/// - clusters: clusters of all passes
/// - stores: the stores the clusters were built from, used to list members
///
pub fn write_cluster_beds(
    dir: &Path,
    clusters: &[Cluster],
    stores: &[SignatureStore],
) -> Result<Vec<PathBuf>> {
    let mut files: BTreeMap<&'static str, Vec<String>> = CLUSTER_BED_FILES
        .iter()
        .map(|name| (*name, Vec::new()))
        .collect();

    for cluster in clusters {
        let pass = &cluster.id().pass;
        let mut matching = stores.iter().filter(|s| &s.name == pass);
        let store = matching
            .next()
            .ok_or_else(|| OutputError::UnknownPass(cluster.id().to_string()))?;
        if matching.next().is_some() {
            return Err(OutputError::AmbiguousPass(pass.clone()));
        }
        let members = cluster
            .members()
            .iter()
            .filter_map(|id| store.get(*id))
            .map(|s| s.as_string(":"))
            .collect::<Vec<String>>()
            .join("||");

        for (file, line) in cluster_lines(cluster, &members) {
            files.entry(file).or_default().push(line);
        }
    }

    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(files.len());
    for name in CLUSTER_BED_FILES {
        let path = dir.join(name);
        let mut writer = BufWriter::new(File::create(&path)?);
        for line in files.get(name).into_iter().flatten() {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::collections::BTreeSet;
    use svclust_core::models::{
        ClusterId, Consensus, Locus, PartitionKey, Signature, SignatureId, SortOrder, VariantType,
    };

    fn tandem_cluster(store: &SignatureStore, members: Vec<SignatureId>) -> Cluster {
        let reads: BTreeSet<String> = members.iter().map(|m| store[*m].read.clone()).collect();
        Cluster::new(
            ClusterId {
                pass: store.name.clone(),
                index: 0,
            },
            PartitionKey {
                chr: "1".to_string(),
                variant_type: VariantType::TandemDuplication,
                partner_chr: None,
            },
            members,
            reads,
            Consensus {
                locus: Locus::new("1", 100, 400),
                kind: VariantKind::TandemDuplication { copies: 2 },
                std_span: 1.5,
                std_pos: 0.0,
            },
        )
    }

    #[rstest]
    fn test_write_tandem_duplication_dump() {
        let mut store = SignatureStore::new("reads", Some(SortOrder::Queryname));
        let ids: Vec<SignatureId> = [
            Signature::tandem_duplication("1", 100, 400, 2, "r1"),
            Signature::tandem_duplication("1", 100, 400, 2, "r2"),
        ]
        .into_iter()
        .filter_map(|s| store.insert(s))
        .collect();
        let cluster = tandem_cluster(&store, ids);

        let dir = tempfile::tempdir().unwrap();
        let written = write_cluster_beds(dir.path(), &[cluster], &[store]).unwrap();
        assert_eq!(written.len(), 7);

        let source = std::fs::read_to_string(dir.path().join("dup_tan_source.bed")).unwrap();
        assert_eq!(
            source,
            "1\t100\t400\tdup;600;1.50;0.00\t2\t1:100:400:dup;copies=2;.:r1||1:100:400:dup;copies=2;.:r2\n"
        );
        let dest = std::fs::read_to_string(dir.path().join("dup_tan_dest.bed")).unwrap();
        assert!(dest.starts_with("1\t400\t1000\t"));
        let deletions = std::fs::read_to_string(dir.path().join("del.bed")).unwrap();
        assert!(deletions.is_empty());
    }

    #[rstest]
    fn test_unknown_pass_is_an_error() {
        let mut store = SignatureStore::new("reads", Some(SortOrder::Queryname));
        let ids: Vec<SignatureId> = store
            .insert(Signature::tandem_duplication("1", 100, 400, 2, "r1"))
            .into_iter()
            .collect();
        let cluster = tandem_cluster(&store, ids);
        let other = SignatureStore::new("clips", Some(SortOrder::Queryname));

        let dir = tempfile::tempdir().unwrap();
        let result = write_cluster_beds(dir.path(), &[cluster], &[other]);
        assert!(matches!(result, Err(OutputError::UnknownPass(_))));
    }

    #[rstest]
    fn test_duplicate_pass_name_is_an_error() {
        let mut store = SignatureStore::new("reads", Some(SortOrder::Queryname));
        let ids: Vec<SignatureId> = store
            .insert(Signature::tandem_duplication("1", 100, 400, 2, "r1"))
            .into_iter()
            .collect();
        let cluster = tandem_cluster(&store, ids);
        let twin = SignatureStore::new("reads", Some(SortOrder::Queryname));

        let dir = tempfile::tempdir().unwrap();
        let result = write_cluster_beds(dir.path(), &[cluster], &[store, twin]);
        assert!(matches!(result, Err(OutputError::AmbiguousPass(name)) if name == "reads"));
    }
}
