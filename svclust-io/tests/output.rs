use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::*;

use svclust_core::models::{Breakend, Call, Genotype, Orientation, ReferenceMetadata, VariantKind};
use svclust_io::{BedWrite, CallSet, VcfHeader, VcfWrite};

#[fixture]
fn reference() -> ReferenceMetadata {
    let path = PathBuf::from("../tests/data/reference/genome.fa.fai");
    ReferenceMetadata::try_from(path.as_path()).unwrap()
}

fn call(chr: &str, start: u32, end: u32, kind: VariantKind, support: usize) -> Call {
    Call {
        id: None,
        chr: chr.to_string(),
        start,
        end,
        kind,
        genotype: Genotype::Heterozygous,
        support,
        depth: Some(10),
        quality: 40,
        std_span: 2.0,
        std_pos: 1.0,
        clusters: Vec::new(),
    }
}

#[rstest]
fn test_bed_and_vcf_describe_the_same_calls(reference: ReferenceMetadata) {
    let calls = vec![
        call("X", 4005, 4005, VariantKind::Insertion { length: 90 }, 2),
        call(
            "1",
            5005,
            5005,
            VariantKind::Translocation {
                mate: Breakend::new("2", 8010),
                orientation: Orientation::Forward,
                mate_orientation: Orientation::Reverse,
            },
            2,
        ),
        call("2", 30010, 30010, VariantKind::Insertion { length: 335 }, 3),
        call("1", 1001, 1202, VariantKind::Deletion, 4),
    ];
    let set = CallSet::assemble(calls, &reference);

    let dir = tempfile::tempdir().unwrap();
    let bed_path = dir.path().join("calls.bed");
    let vcf_path = dir.path().join("calls.vcf");
    set.write_bed(&bed_path).unwrap();
    set.write_vcf(&vcf_path, &VcfHeader::new("Sample", "ngmlr"))
        .unwrap();

    let bed = std::fs::read_to_string(&bed_path).unwrap();
    let bed_lines: Vec<&str> = bed.lines().collect();
    assert_eq!(
        bed_lines,
        vec![
            "1\t1001\t1202\tDEL",
            "1\t5005\t5006\tBND",
            "2\t30010\t30011\tINS",
            "X\t4005\t4006\tINS",
        ]
    );

    let vcf = std::fs::read_to_string(&vcf_path).unwrap();
    let records: Vec<Vec<&str>> = vcf
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split('\t').collect())
        .collect();
    assert_eq!(records.len(), bed_lines.len());

    // same order, POS is one-based
    for (record, bed_line) in records.iter().zip(&bed_lines) {
        let bed_fields: Vec<&str> = bed_line.split('\t').collect();
        assert_eq!(record[0], bed_fields[0]);
        assert_eq!(
            record[1].parse::<u32>().unwrap(),
            bed_fields[1].parse::<u32>().unwrap() + 1
        );
    }

    let ids: Vec<&str> = records.iter().map(|r| r[2]).collect();
    assert_eq!(
        ids,
        vec!["svclust.DEL.1", "svclust.BND.1", "svclust.INS.1", "svclust.INS.2"]
    );

    let contigs = vcf.lines().filter(|l| l.starts_with("##contig")).count();
    assert_eq!(contigs, 3);
}
