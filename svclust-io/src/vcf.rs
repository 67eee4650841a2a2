use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use svclust_core::models::{Breakend, Call, Orientation, ReferenceMetadata, VariantKind, VariantType};

use crate::assembly::CallSet;

const ALT_LINES: [(&str, &str); 5] = [
    ("DEL", "Deletion"),
    ("INS", "Insertion"),
    ("INV", "Inversion"),
    ("DUP:TANDEM", "Tandem Duplication"),
    ("DUP:INT", "Interspersed Duplication"),
];

const INFO_LINES: [(&str, &str, &str); 13] = [
    ("SVTYPE", "String", "Type of structural variant"),
    ("END", "Integer", "End position of the variant described in this record"),
    ("SVLEN", "Integer", "Difference in length between REF and ALT alleles"),
    ("SUPPORT", "Integer", "Number of distinct reads supporting this variant"),
    ("STD_SPAN", "Float", "Standard deviation in span of merged SV signatures"),
    ("STD_POS", "Float", "Standard deviation in position of merged SV signatures"),
    ("CHR2", "String", "Chromosome of the second breakend"),
    ("POS2", "Integer", "Position of the second breakend"),
    ("ORIGIN_CHR", "String", "Chromosome of the inserted sequence's origin"),
    ("ORIGIN_START", "Integer", "Start position of the inserted sequence's origin"),
    ("ORIGIN_END", "Integer", "End position of the inserted sequence's origin"),
    ("COPIES", "Integer", "Number of tandem copies"),
    ("CLUSTERS", "Integer", "Number of merged signature clusters"),
];

/// Run-level fields of the VCF header.
#[derive(Debug, Clone, PartialEq)]
pub struct VcfHeader {
    pub source: String,
    pub sample_id: String,
    pub aligner: String,
}

impl VcfHeader {
    pub fn new(sample_id: &str, aligner: &str) -> Self {
        VcfHeader {
            source: format!("svclust-v{}", env!("CARGO_PKG_VERSION")),
            sample_id: sample_id.to_string(),
            aligner: aligner.to_string(),
        }
    }

    pub fn render(&self, reference: &ReferenceMetadata) -> String {
        let mut lines: Vec<String> = vec![
            "##fileformat=VCFv4.2".to_string(),
            format!("##source={}", self.source),
        ];
        if let Some(path) = &reference.path {
            lines.push(format!("##reference=file://{}", path.display()));
        }
        for contig in reference.contigs() {
            lines.push(format!(
                "##contig=<ID={},length={}>",
                contig.name, contig.length
            ));
        }
        for (id, description) in ALT_LINES {
            lines.push(format!("##ALT=<ID={},Description=\"{}\">", id, description));
        }
        for (id, kind, description) in INFO_LINES {
            lines.push(format!(
                "##INFO=<ID={},Number=1,Type={},Description=\"{}\">",
                id, kind, description
            ));
        }
        lines.push("##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">".to_string());
        lines.push(
            "##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read depth at the variant locus\">"
                .to_string(),
        );
        lines.push(format!("##aligner={}", self.aligner));
        lines.push(format!(
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\t{}",
            self.sample_id
        ));
        lines.join("\n")
    }
}

///
/// Breakend ALT in VCF bracket notation. A forward first breakend keeps the
/// sequence before it (`N` leads), a forward mate joins the sequence right of the
/// mate position (`[` brackets).
///
fn breakend_alt(mate: &Breakend, orientation: Orientation, mate_orientation: Orientation) -> String {
    let position = format!("{}:{}", mate.chr, mate.pos + 1);
    let bracketed = match mate_orientation {
        Orientation::Forward => format!("[{}[", position),
        Orientation::Reverse => format!("]{}]", position),
    };
    match orientation {
        Orientation::Forward => format!("N{}", bracketed),
        Orientation::Reverse => format!("{}N", bracketed),
    }
}

/// One VCF data line for a call.
pub fn vcf_record(call: &Call) -> String {
    let variant_type = call.variant_type();
    let pos = call.start + 1;

    let mut info: Vec<String> = vec![format!("SVTYPE={}", variant_type.label())];
    let alt = match &call.kind {
        VariantKind::Translocation {
            mate,
            orientation,
            mate_orientation,
        } => {
            info.push(format!("CHR2={}", mate.chr));
            info.push(format!("POS2={}", mate.pos + 1));
            breakend_alt(mate, *orientation, *mate_orientation)
        }
        kind => {
            let end = if kind.is_point() { pos } else { call.end };
            info.push(format!("END={}", end));
            let length = i64::from(call.length().unwrap_or(0));
            let svlen = match variant_type {
                VariantType::Deletion => -length,
                _ => length,
            };
            info.push(format!("SVLEN={}", svlen));
            format!("<{}>", variant_type.label())
        }
    };

    info.push(format!("SUPPORT={}", call.support));
    info.push(format!("STD_SPAN={:.2}", call.std_span));
    info.push(format!("STD_POS={:.2}", call.std_pos));
    match &call.kind {
        VariantKind::TandemDuplication { copies } => info.push(format!("COPIES={}", copies)),
        VariantKind::InsertionFrom { origin } => {
            info.push(format!("ORIGIN_CHR={}", origin.chr));
            info.push(format!("ORIGIN_START={}", origin.start + 1));
            info.push(format!("ORIGIN_END={}", origin.end));
        }
        _ => {}
    }
    if call.clusters.len() > 1 {
        info.push(format!("CLUSTERS={}", call.clusters.len()));
    }

    let depth = call
        .depth
        .map(|d| d.to_string())
        .unwrap_or_else(|| ".".to_string());

    [
        call.chr.clone(),
        pos.to_string(),
        call.id.clone().unwrap_or_else(|| ".".to_string()),
        "N".to_string(),
        alt,
        call.quality.to_string(),
        "PASS".to_string(),
        info.join(";"),
        "GT:DP".to_string(),
        format!("{}:{}", call.genotype.as_vcf(), depth),
    ]
    .join("\t")
}

pub trait VcfWrite {
    ///
    /// Write header and records to any writer.
    ///
    fn write_vcf_to<W: Write>(&self, writer: &mut W, header: &VcfHeader) -> std::io::Result<()>;

    ///
    /// Write data to disk as vcf file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - header: run-level header fields
    fn write_vcf<T: AsRef<Path>>(&self, path: T, header: &VcfHeader) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_vcf_to(&mut writer, header)?;
        writer.flush()
    }

    ///
    /// Write data to disk as vcf.gz file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - header: run-level header fields
    fn write_vcf_gz<T: AsRef<Path>>(&self, path: T, header: &VcfHeader) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
        self.write_vcf_to(&mut encoder, header)?;
        encoder.finish()?;
        Ok(())
    }
}

impl VcfWrite for CallSet {
    fn write_vcf_to<W: Write>(&self, writer: &mut W, header: &VcfHeader) -> std::io::Result<()> {
        writeln!(writer, "{}", header.render(self.reference()))?;
        for call in self.iter() {
            writeln!(writer, "{}", vcf_record(call))?;
        }
        Ok(())
    }
}
