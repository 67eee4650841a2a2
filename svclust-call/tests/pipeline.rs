use std::collections::BTreeSet;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rstest::*;

use svclust_call::{
    CallReport, DepthTable, NoDepth, call_structural_variants, cluster_signatures,
};
use svclust_core::models::{
    Call, Genotype, Locus, Signature, SignatureStore, SortOrder, VariantKind, VariantType,
};
use svclust_core::{Diagnostic, MalformedSignature, RunConfig, SvClustError};

#[fixture]
fn config() -> RunConfig {
    RunConfig {
        max_distance: Some(50),
        ..Default::default()
    }
}

fn store_of(name: &str, signatures: Vec<Signature>) -> SignatureStore {
    let mut store = SignatureStore::new(name, Some(SortOrder::Queryname));
    for signature in signatures {
        store.insert(signature);
    }
    store
}

fn fixture_store(name: &str) -> SignatureStore {
    let path = PathBuf::from(format!("../tests/data/signatures/{}.tsv", name));
    SignatureStore::try_from(path.as_path()).unwrap()
}

fn find(report: &CallReport, variant_type: VariantType, chr: &str) -> Vec<Call> {
    let mut calls: Vec<Call> = report
        .calls
        .iter()
        .filter(|c| c.variant_type() == variant_type && c.chr == chr)
        .cloned()
        .collect();
    calls.sort_by_key(|c| c.start);
    calls
}

#[rstest]
fn test_simple_deletion(config: RunConfig) {
    let store = store_of(
        "reads",
        vec![
            Signature::deletion("1", 1000, 1200, "r1"),
            Signature::deletion("1", 1010, 1190, "r2"),
            Signature::deletion("1", 995, 1205, "r3"),
        ],
    );

    let report = call_structural_variants(&[store], &config, &NoDepth).unwrap();
    assert_eq!(report.clusters.len(), 1);
    assert_eq!(report.calls.len(), 1);

    let call = &report.calls[0];
    assert_eq!(call.variant_type(), VariantType::Deletion);
    assert_eq!((call.start, call.end), (1000, 1200));
    assert_eq!(call.support, 3);
    assert_eq!(call.length(), Some(200));
    assert_eq!(call.genotype, Genotype::Unknown);
}

#[rstest]
fn test_disjoint_clusters(config: RunConfig) {
    let store = store_of(
        "reads",
        vec![
            Signature::deletion("1", 1000, 1200, "r1"),
            Signature::deletion("1", 50000, 50200, "r2"),
        ],
    );

    let report = call_structural_variants(&[store], &config, &NoDepth).unwrap();
    assert_eq!(report.calls.len(), 2);
}

#[rstest]
fn test_minimum_support_filtering(mut config: RunConfig) {
    config.min_support = 2;
    let store = store_of(
        "reads",
        vec![
            Signature::deletion("1", 1000, 1200, "r1"),
            Signature::deletion("1", 1010, 1190, "r2"),
            Signature::deletion("1", 50000, 50200, "r3"),
        ],
    );

    let report = call_structural_variants(&[store], &config, &NoDepth).unwrap();
    assert_eq!(report.calls.len(), 1);
    assert_eq!(report.calls[0].start, 1005);
}

#[rstest]
fn test_translocation_agreement(config: RunConfig) {
    let store = store_of(
        "reads",
        vec![
            Signature::translocation("1", 5000, "2", 8000, "r1"),
            Signature::translocation("1", 5010, "2", 8020, "r2"),
            Signature::translocation("2", 8010, "1", 5020, "r3"),
        ],
    );

    let report = call_structural_variants(&[store], &config, &NoDepth).unwrap();
    assert_eq!(report.calls.len(), 1);

    let call = &report.calls[0];
    assert_eq!(call.chr, "1");
    assert_eq!(call.start, 5010);
    assert_eq!(call.support, 3);
    match &call.kind {
        VariantKind::Translocation { mate, .. } => {
            assert_eq!(mate.chr, "2");
            assert_eq!(mate.pos, 8010);
        }
        other => panic!("unexpected kind {:?}", other),
    }
}

#[rstest]
fn test_translocation_mate_disagreement(config: RunConfig) {
    let store = store_of(
        "reads",
        vec![
            Signature::translocation("1", 5000, "2", 8000, "r1"),
            Signature::translocation("1", 5010, "2", 98000, "r2"),
        ],
    );

    let report = call_structural_variants(&[store], &config, &NoDepth).unwrap();
    assert_eq!(report.calls.len(), 2);
}

#[rstest]
fn test_two_passes_from_files(config: RunConfig) {
    let stores = vec![fixture_store("split"), fixture_store("clips")];
    let report = call_structural_variants(&stores, &config, &NoDepth).unwrap();

    assert_eq!(report.calls.len(), 6);

    let deletions = find(&report, VariantType::Deletion, "1");
    assert_eq!(deletions.len(), 2);
    assert_eq!((deletions[0].start, deletions[0].end), (1001, 1202));
    assert_eq!(deletions[0].support, 4);
    assert_eq!(deletions[0].clusters.len(), 2);

    let insertions = find(&report, VariantType::Insertion, "2");
    assert_eq!(insertions.len(), 1);
    assert_eq!(insertions[0].start, 30010);
    assert_eq!(insertions[0].kind, VariantKind::Insertion { length: 335 });

    let duplications = find(&report, VariantType::TandemDuplication, "1");
    assert_eq!(duplications[0].length(), Some(1980));

    let insertions_from = find(&report, VariantType::InsertionFrom, "X");
    assert_eq!(
        insertions_from[0].kind,
        VariantKind::InsertionFrom {
            origin: Locus::new("1", 20005, 20495)
        }
    );

    // the inverted record of the split pass is reported, not clustered
    let malformed: Vec<&Diagnostic> = report
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::MalformedSignature { .. }))
        .collect();
    assert_eq!(malformed.len(), 1);
    assert!(matches!(
        malformed[0],
        Diagnostic::MalformedSignature { line: Some(11), .. }
    ));
}

#[rstest]
fn test_genotypes_with_depth(config: RunConfig) {
    let stores = vec![fixture_store("split"), fixture_store("clips")];
    let depth = DepthTable::try_from(PathBuf::from("../tests/data/depth/depth.bed").as_path())
        .unwrap();

    let report = call_structural_variants(&stores, &config, &depth).unwrap();

    let deletions = find(&report, VariantType::Deletion, "1");
    assert_eq!(deletions[0].depth, Some(6));
    assert_eq!(deletions[0].genotype, Genotype::Heterozygous);

    let insertions = find(&report, VariantType::Insertion, "2");
    assert_eq!(insertions[0].genotype, Genotype::HomozygousRef);

    // depth 2 on X is below the floor
    let insertions_from = find(&report, VariantType::InsertionFrom, "X");
    assert_eq!(insertions_from[0].genotype, Genotype::Unknown);
    let low_depth = report
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::InsufficientDepth { .. }))
        .count();
    assert_eq!(low_depth, 1);
}

#[rstest]
#[case("unsorted")]
#[case("no_header")]
fn test_input_order_error_aborts(config: RunConfig, #[case] name: &str) {
    let stores = vec![fixture_store("split"), fixture_store(name)];
    let result = call_structural_variants(&stores, &config, &NoDepth);
    assert!(matches!(result, Err(SvClustError::InputOrder { .. })));
}

#[rstest]
fn test_empty_evidence(config: RunConfig) {
    let report = call_structural_variants(&[fixture_store("empty")], &config, &NoDepth).unwrap();
    assert!(report.calls.is_empty());
    assert!(report.diagnostics.contains(&Diagnostic::EmptyEvidence));
    assert!(report.diagnostics.contains(&Diagnostic::DegradedSortOrder {
        pass: "empty".to_string()
    }));
}

#[rstest]
fn test_invalid_config_is_rejected(mut config: RunConfig) {
    config.genotyping.heterozygous_fraction = 0.9;
    let result = call_structural_variants(&[fixture_store("split")], &config, &NoDepth);
    assert!(matches!(result, Err(SvClustError::InvalidConfig(_))));
}

fn random_signatures(seed: u64) -> Vec<Signature> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut signatures = Vec::new();
    for i in 0..300 {
        let chr = ["1", "2"][rand::Rng::random_range(&mut rng, 0..2)];
        let start = rand::Rng::random_range(&mut rng, 0..50_000u32);
        let width = rand::Rng::random_range(&mut rng, 50..2_000u32);
        // reads supporting several records test deduplication
        let read = format!("r{}", i % 120);
        let signature = match i % 4 {
            0 => Signature::deletion(chr, start, start + width, &read),
            1 => Signature::insertion(chr, start, width, &read),
            2 => Signature::inversion(chr, start, start + width, &read),
            _ => Signature::translocation(chr, start, ["1", "2"][i % 2], start / 2, &read),
        };
        signatures.push(signature);
    }
    signatures
}

#[rstest]
fn test_determinism_under_shuffling_and_threads(config: RunConfig) {
    let signatures = random_signatures(11);
    let expected = call_structural_variants(
        &[store_of("reads", signatures.clone())],
        &config,
        &NoDepth,
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(3);
    for threads in [1, 2, 4] {
        let mut shuffled = signatures.clone();
        shuffled.shuffle(&mut rng);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        let report = pool
            .install(|| {
                call_structural_variants(&[store_of("reads", shuffled)], &config, &NoDepth)
            })
            .unwrap();

        assert_eq!(report.calls, expected.calls);
    }

    assert!(!expected.calls.is_empty());
}

#[rstest]
fn test_support_conservation(config: RunConfig) {
    let stores = vec![
        store_of("split", random_signatures(5)),
        store_of("clips", random_signatures(6)),
    ];
    let report = call_structural_variants(&stores, &config, &NoDepth).unwrap();

    for call in &report.calls {
        let mut reads: BTreeSet<String> = BTreeSet::new();
        for cluster_id in &call.clusters {
            let cluster = report
                .clusters
                .iter()
                .find(|c| c.id() == cluster_id)
                .unwrap();
            reads.extend(cluster.reads().iter().cloned());
        }
        assert_eq!(call.support, reads.len());
    }
}

#[rstest]
fn test_monotonic_quality(config: RunConfig) {
    let weak = store_of(
        "reads",
        vec![
            Signature::deletion("1", 1000, 1200, "r1"),
            Signature::deletion("1", 1000, 1200, "r2"),
        ],
    );
    let strong = store_of(
        "reads",
        vec![
            Signature::deletion("1", 1000, 1200, "r1"),
            Signature::deletion("1", 1000, 1200, "r2"),
            Signature::deletion("1", 1000, 1200, "r3"),
        ],
    );

    let weak = call_structural_variants(&[weak], &config, &NoDepth).unwrap();
    let strong = call_structural_variants(&[strong], &config, &NoDepth).unwrap();
    assert!(strong.calls[0].quality >= weak.calls[0].quality);
    assert!(strong.calls[0].support > weak.calls[0].support);
}

#[rstest]
fn test_cluster_calls_are_ungenotyped(config: RunConfig) {
    let store = store_of(
        "reads",
        vec![
            Signature::deletion("1", 1000, 1200, "r1"),
            Signature::deletion("1", 1002, 1198, "r2"),
            Signature::deletion("1", 9000, 9400, "r3"),
        ],
    );
    let report = cluster_signatures(&[store], &config).unwrap();
    let calls = report.cluster_calls(&config.quality);

    assert_eq!(calls.len(), report.clusters.len());
    for (call, cluster) in calls.iter().zip(&report.clusters) {
        assert_eq!(call.genotype, Genotype::Unknown);
        assert_eq!(call.support, cluster.support());
        assert_eq!(call.clusters, vec![cluster.id().clone()]);
        assert_eq!(call.depth, None);
    }
}

#[rstest]
fn test_duplicate_pass_names_are_rejected(config: RunConfig) {
    let first = store_of("reads", vec![Signature::deletion("1", 1000, 1200, "rA")]);
    let second = store_of("reads", vec![Signature::deletion("2", 5000, 5300, "rB")]);

    let result = call_structural_variants(&[first, second], &config, &NoDepth);
    assert!(matches!(result, Err(SvClustError::DuplicatePass(name)) if name == "reads"));
}

#[rstest]
fn test_oversized_tandem_duplication_is_dropped(config: RunConfig) {
    let store = store_of(
        "reads",
        vec![
            Signature::tandem_duplication("1", 0, 100_000, 50_000, "r1"),
            Signature::tandem_duplication("1", 200_000, 200_500, 2, "r2"),
        ],
    );

    let report = call_structural_variants(&[store], &config, &NoDepth).unwrap();
    assert_eq!(report.calls.len(), 1);
    assert_eq!(report.calls[0].length(), Some(1000));
    assert!(report.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::MalformedSignature {
            reason: MalformedSignature::SizeOverflow { .. },
            ..
        }
    )));
}
