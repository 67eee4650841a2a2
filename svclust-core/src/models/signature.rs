use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MalformedSignature;
use crate::models::locus::{Breakend, Locus, parse_position};

///
/// Structural variant class, without any type-specific payload.
///
/// Declaration order is the order calls of the same position are written in.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantType {
    Deletion,
    Insertion,
    Inversion,
    TandemDuplication,
    Translocation,
    InsertionFrom,
}

impl VariantType {
    pub const ALL: [VariantType; 6] = [
        VariantType::Deletion,
        VariantType::Insertion,
        VariantType::Inversion,
        VariantType::TandemDuplication,
        VariantType::Translocation,
        VariantType::InsertionFrom,
    ];

    /// Label used in BED output and the VCF `SVTYPE` field.
    pub fn label(&self) -> &'static str {
        match self {
            VariantType::Deletion => "DEL",
            VariantType::Insertion => "INS",
            VariantType::Inversion => "INV",
            VariantType::TandemDuplication => "DUP:TANDEM",
            VariantType::Translocation => "BND",
            VariantType::InsertionFrom => "DUP:INT",
        }
    }

    /// Short name used in signature files and cluster dump file names.
    pub fn short_name(&self) -> &'static str {
        match self {
            VariantType::Deletion => "del",
            VariantType::Insertion => "ins",
            VariantType::Inversion => "inv",
            VariantType::TandemDuplication => "dup",
            VariantType::Translocation => "tra",
            VariantType::InsertionFrom => "ins_dup",
        }
    }
}

impl Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for VariantType {
    type Err = MalformedSignature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "del" | "deletion" => Ok(VariantType::Deletion),
            "ins" | "insertion" => Ok(VariantType::Insertion),
            "inv" | "inversion" => Ok(VariantType::Inversion),
            "dup" | "dup:tandem" | "tandem_duplication" => Ok(VariantType::TandemDuplication),
            "tra" | "bnd" | "translocation" => Ok(VariantType::Translocation),
            "ins_dup" | "dup:int" | "insertion_from" => Ok(VariantType::InsertionFrom),
            _ => Err(MalformedSignature::UnknownType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    pub fn flipped(&self) -> Orientation {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Forward => "fwd",
            Orientation::Reverse => "rev",
        }
    }
}

impl FromStr for Orientation {
    type Err = MalformedSignature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fwd" | "+" | "forward" => Ok(Orientation::Forward),
            "rev" | "-" | "reverse" => Ok(Orientation::Reverse),
            _ => Err(MalformedSignature::InvalidAttribute(s.to_string())),
        }
    }
}

///
/// Type-specific payload of a signature, cluster consensus or call.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum VariantKind {
    Deletion,
    Insertion {
        length: u32,
    },
    Inversion {
        orientation: Option<Orientation>,
    },
    TandemDuplication {
        copies: u32,
    },
    Translocation {
        mate: Breakend,
        orientation: Orientation,
        mate_orientation: Orientation,
    },
    InsertionFrom {
        origin: Locus,
    },
}

impl VariantKind {
    pub fn variant_type(&self) -> VariantType {
        match self {
            VariantKind::Deletion => VariantType::Deletion,
            VariantKind::Insertion { .. } => VariantType::Insertion,
            VariantKind::Inversion { .. } => VariantType::Inversion,
            VariantKind::TandemDuplication { .. } => VariantType::TandemDuplication,
            VariantKind::Translocation { .. } => VariantType::Translocation,
            VariantKind::InsertionFrom { .. } => VariantType::InsertionFrom,
        }
    }

    /// Event size for an event spanning `[start, end)`. Translocations have none.
    pub fn size(&self, start: u32, end: u32) -> Option<u32> {
        match self {
            VariantKind::Deletion | VariantKind::Inversion { .. } => Some(end - start),
            VariantKind::Insertion { length } => Some(*length),
            // saturates for consensus payloads; stored signatures never overflow
            VariantKind::TandemDuplication { copies } => {
                Some((end - start).saturating_mul(*copies))
            }
            VariantKind::InsertionFrom { origin } => Some(origin.width()),
            VariantKind::Translocation { .. } => None,
        }
    }

    /// Chromosome of the second locus, for kinds that have one.
    pub fn partner_chr(&self) -> Option<&str> {
        match self {
            VariantKind::Translocation { mate, .. } => Some(&mate.chr),
            VariantKind::InsertionFrom { origin } => Some(&origin.chr),
            _ => None,
        }
    }

    /// Interval on the partner chromosome that has to agree for two records to link.
    pub fn partner_interval(&self) -> Option<(u32, u32)> {
        match self {
            VariantKind::Translocation { mate, .. } => Some((mate.pos, mate.pos)),
            VariantKind::InsertionFrom { origin } => Some((origin.start, origin.end)),
            _ => None,
        }
    }

    /// Whether records of this kind are anchored at a single position.
    pub fn is_point(&self) -> bool {
        matches!(
            self,
            VariantKind::Insertion { .. }
                | VariantKind::Translocation { .. }
                | VariantKind::InsertionFrom { .. }
        )
    }
}

/// Index of a signature inside its [`SignatureStore`](crate::models::SignatureStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SignatureId(pub usize);

///
/// Key of one clustering partition: signatures are only ever compared inside a
/// partition. Translocations and insertions with origin are split further by the
/// chromosome of their second locus.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PartitionKey {
    pub chr: String,
    pub variant_type: VariantType,
    pub partner_chr: Option<String>,
}

impl Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.partner_chr {
            Some(partner) => write!(f, "{}/{}/{}", self.chr, self.variant_type, partner),
            None => write!(f, "{}/{}", self.chr, self.variant_type),
        }
    }
}

///
/// One read's evidence for a structural variant.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub kind: VariantKind,
    pub read: String,
    pub source: Option<String>,
}

impl Signature {
    pub fn deletion(chr: &str, start: u32, end: u32, read: &str) -> Self {
        Self::with_kind(chr, start, end, VariantKind::Deletion, read)
    }

    pub fn insertion(chr: &str, pos: u32, length: u32, read: &str) -> Self {
        Self::with_kind(chr, pos, pos, VariantKind::Insertion { length }, read)
    }

    pub fn inversion(chr: &str, start: u32, end: u32, read: &str) -> Self {
        Self::with_kind(
            chr,
            start,
            end,
            VariantKind::Inversion { orientation: None },
            read,
        )
    }

    pub fn tandem_duplication(chr: &str, start: u32, end: u32, copies: u32, read: &str) -> Self {
        Self::with_kind(
            chr,
            start,
            end,
            VariantKind::TandemDuplication { copies },
            read,
        )
    }

    pub fn translocation(chr: &str, pos: u32, mate_chr: &str, mate_pos: u32, read: &str) -> Self {
        Self::with_kind(
            chr,
            pos,
            pos,
            VariantKind::Translocation {
                mate: Breakend::new(mate_chr, mate_pos),
                orientation: Orientation::Forward,
                mate_orientation: Orientation::Forward,
            },
            read,
        )
    }

    pub fn insertion_from(chr: &str, pos: u32, origin: Locus, read: &str) -> Self {
        Self::with_kind(chr, pos, pos, VariantKind::InsertionFrom { origin }, read)
    }

    pub fn with_kind(chr: &str, start: u32, end: u32, kind: VariantKind, read: &str) -> Self {
        Signature {
            chr: chr.to_string(),
            start,
            end,
            kind,
            read: read.to_string(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn variant_type(&self) -> VariantType {
        self.kind.variant_type()
    }

    pub fn locus(&self) -> Locus {
        Locus::new(&self.chr, self.start, self.end)
    }

    pub fn size(&self) -> Option<u32> {
        self.kind.size(self.start, self.end)
    }

    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey {
            chr: self.chr.clone(),
            variant_type: self.variant_type(),
            partner_chr: self.kind.partner_chr().map(str::to_string),
        }
    }

    ///
    /// Check the structural invariants of a signature.
    ///
    pub fn validate(&self) -> Result<(), MalformedSignature> {
        if self.start > self.end {
            return Err(MalformedSignature::InvertedInterval {
                start: self.start,
                end: self.end,
            });
        }

        match &self.kind {
            VariantKind::Deletion | VariantKind::Inversion { .. } => {
                if self.start == self.end {
                    return Err(MalformedSignature::EmptyInterval(self.start));
                }
            }
            VariantKind::TandemDuplication { copies } => {
                if self.start == self.end {
                    return Err(MalformedSignature::EmptyInterval(self.start));
                }
                if *copies == 0 {
                    return Err(MalformedSignature::ZeroCopies);
                }
                let span = self.end - self.start;
                if span.checked_mul(*copies).is_none() {
                    return Err(MalformedSignature::SizeOverflow {
                        span,
                        copies: *copies,
                    });
                }
            }
            VariantKind::Insertion { length } => {
                if self.start != self.end {
                    return Err(MalformedSignature::NotAPoint("insertion"));
                }
                if *length == 0 {
                    return Err(MalformedSignature::ZeroLength);
                }
            }
            VariantKind::Translocation { mate, .. } => {
                if self.start != self.end {
                    return Err(MalformedSignature::NotAPoint("translocation"));
                }
                if mate.chr.is_empty() {
                    return Err(MalformedSignature::MissingMate);
                }
            }
            VariantKind::InsertionFrom { origin } => {
                if self.start != self.end {
                    return Err(MalformedSignature::NotAPoint("insertion with origin"));
                }
                if origin.chr.is_empty() {
                    return Err(MalformedSignature::MissingOrigin);
                }
                if origin.start > origin.end {
                    return Err(MalformedSignature::InvertedInterval {
                        start: origin.start,
                        end: origin.end,
                    });
                }
            }
        }

        Ok(())
    }

    ///
    /// Put a translocation into canonical orientation: the breakend that sorts first
    /// becomes the primary one. Observations of the same adjacency from either side
    /// end up identical. Other kinds are returned unchanged.
    ///
    pub fn canonicalize(self) -> Self {
        match self.kind {
            VariantKind::Translocation {
                mate,
                orientation,
                mate_orientation,
            } if (mate.chr.as_str(), mate.pos) < (self.chr.as_str(), self.start) => Signature {
                chr: mate.chr,
                start: mate.pos,
                end: mate.pos,
                kind: VariantKind::Translocation {
                    mate: Breakend {
                        chr: self.chr,
                        pos: self.start,
                    },
                    orientation: mate_orientation.flipped(),
                    mate_orientation: orientation.flipped(),
                },
                read: self.read,
                source: self.source,
            },
            kind => Signature { kind, ..self },
        }
    }

    ///
    /// Parse one record of a signature file:
    /// `chr  start  end  type  read  [key=value;...]`
    ///
    pub fn from_record(line: &str) -> Result<Self, MalformedSignature> {
        let mut fields = line.split('\t');

        let chr = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(MalformedSignature::MissingField("chr"))?;
        let start = parse_position(
            fields.next().ok_or(MalformedSignature::MissingField("start"))?,
            "start",
        )?;
        let end = parse_position(
            fields.next().ok_or(MalformedSignature::MissingField("end"))?,
            "end",
        )?;
        let variant_type: VariantType = fields
            .next()
            .ok_or(MalformedSignature::MissingField("type"))?
            .parse()?;
        let read = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(MalformedSignature::MissingField("read"))?;
        let attributes = RecordAttributes::parse(fields.next().unwrap_or("."))?;

        if start > end {
            return Err(MalformedSignature::InvertedInterval { start, end });
        }

        let (end, kind) = match variant_type {
            VariantType::Deletion => (end, VariantKind::Deletion),
            VariantType::Inversion => (
                end,
                VariantKind::Inversion {
                    orientation: attributes.orientation,
                },
            ),
            VariantType::TandemDuplication => (
                end,
                VariantKind::TandemDuplication {
                    copies: attributes.copies.unwrap_or(1),
                },
            ),
            VariantType::Insertion => match attributes.length {
                Some(length) if start == end => (end, VariantKind::Insertion { length }),
                Some(_) => return Err(MalformedSignature::NotAPoint("insertion")),
                None => (
                    start,
                    VariantKind::Insertion {
                        length: end - start,
                    },
                ),
            },
            VariantType::Translocation => {
                // a single-base interval is accepted for the first breakend
                if end > start + 1 {
                    return Err(MalformedSignature::NotAPoint("translocation"));
                }
                let mate = attributes.mate.ok_or(MalformedSignature::MissingMate)?;
                (
                    start,
                    VariantKind::Translocation {
                        mate,
                        orientation: attributes.orientation.unwrap_or(Orientation::Forward),
                        mate_orientation: attributes
                            .mate_orientation
                            .unwrap_or(Orientation::Forward),
                    },
                )
            }
            VariantType::InsertionFrom => {
                let origin = attributes.origin.ok_or(MalformedSignature::MissingOrigin)?;
                (end, VariantKind::InsertionFrom { origin })
            }
        };

        let signature = Signature {
            chr: chr.to_string(),
            start,
            end,
            kind,
            read: read.to_string(),
            source: attributes.source,
        };
        signature.validate()?;

        Ok(signature)
    }

    ///
    /// Compact single-line rendering used in cluster dumps.
    ///
    pub fn as_string(&self, sep: &str) -> String {
        let detail = match &self.kind {
            VariantKind::Deletion => String::new(),
            VariantKind::Insertion { length } => format!(";len={}", length),
            VariantKind::Inversion { orientation } => orientation
                .map(|o| format!(";{}", o.as_str()))
                .unwrap_or_default(),
            VariantKind::TandemDuplication { copies } => format!(";copies={}", copies),
            VariantKind::Translocation { mate, .. } => format!(";>{}", mate),
            VariantKind::InsertionFrom { origin } => format!(";<{}", origin),
        };
        [
            self.chr.clone(),
            self.start.to_string(),
            self.end.to_string(),
            format!(
                "{}{};{}",
                self.variant_type().short_name(),
                detail,
                self.source.as_deref().unwrap_or(".")
            ),
            self.read.clone(),
        ]
        .join(sep)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string("\t"))
    }
}

/// Optional `key=value` attributes of a signature record.
#[derive(Default)]
struct RecordAttributes {
    length: Option<u32>,
    copies: Option<u32>,
    orientation: Option<Orientation>,
    mate: Option<Breakend>,
    mate_orientation: Option<Orientation>,
    origin: Option<Locus>,
    source: Option<String>,
}

impl RecordAttributes {
    fn parse(field: &str) -> Result<Self, MalformedSignature> {
        let mut attributes = RecordAttributes::default();
        if field.is_empty() || field == "." {
            return Ok(attributes);
        }

        for pair in field.split(';').filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| MalformedSignature::InvalidAttribute(pair.to_string()))?;
            match key {
                "len" => attributes.length = Some(parse_position(value, "len")?),
                "copies" => {
                    let copies = parse_position(value, "copies")?;
                    if copies == 0 {
                        return Err(MalformedSignature::ZeroCopies);
                    }
                    attributes.copies = Some(copies);
                }
                "dir" => attributes.orientation = Some(value.parse()?),
                "mate" => attributes.mate = Some(value.parse()?),
                "mate_dir" => attributes.mate_orientation = Some(value.parse()?),
                "origin" => attributes.origin = Some(value.parse()?),
                "src" => attributes.source = Some(value.to_string()),
                // attributes added by newer extraction passes are ignored
                _ => {}
            }
        }

        Ok(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parse_deletion() {
        let sig = Signature::from_record("chr1\t1000\t1200\tdel\tr1\tsrc=cigar").unwrap();
        assert_eq!(sig.chr, "chr1");
        assert_eq!(sig.variant_type(), VariantType::Deletion);
        assert_eq!(sig.size(), Some(200));
        assert_eq!(sig.source.as_deref(), Some("cigar"));
    }

    #[rstest]
    fn test_parse_insertion_from_span() {
        let sig = Signature::from_record("chr1\t500\t800\tins\tr1").unwrap();
        assert_eq!(sig.start, 500);
        assert_eq!(sig.end, 500);
        assert_eq!(sig.kind, VariantKind::Insertion { length: 300 });
    }

    #[rstest]
    fn test_parse_insertion_with_length() {
        let sig = Signature::from_record("chr1\t500\t500\tins\tr1\tlen=42").unwrap();
        assert_eq!(sig.kind, VariantKind::Insertion { length: 42 });
    }

    #[rstest]
    fn test_parse_translocation() {
        let sig =
            Signature::from_record("1\t5000\t5001\ttra\tr1\tmate=2:8000;dir=fwd;mate_dir=rev")
                .unwrap();
        assert_eq!(sig.start, 5000);
        assert_eq!(sig.end, 5000);
        assert_eq!(
            sig.kind,
            VariantKind::Translocation {
                mate: Breakend::new("2", 8000),
                orientation: Orientation::Forward,
                mate_orientation: Orientation::Reverse,
            }
        );
        assert_eq!(sig.partition_key().partner_chr.as_deref(), Some("2"));
    }

    #[rstest]
    fn test_parse_insertion_from() {
        let sig = Signature::from_record("chr2\t7000\t7000\tins_dup\tr9\torigin=chr5:100-600")
            .unwrap();
        assert_eq!(sig.size(), Some(500));
        assert_eq!(sig.partition_key().partner_chr.as_deref(), Some("chr5"));
    }

    #[rstest]
    #[case("chr1\t1200\t1000\tdel\tr1", MalformedSignature::InvertedInterval { start: 1200, end: 1000 })]
    #[case("chr1\t1000\t1000\tdel\tr1", MalformedSignature::EmptyInterval(1000))]
    #[case("chr1\t1000\tx\tdel\tr1", MalformedSignature::InvalidNumber { field: "end", value: "x".to_string() })]
    #[case("chr1\t1000\t1200\tfoo\tr1", MalformedSignature::UnknownType("foo".to_string()))]
    #[case("chr1\t1000\t1200\tdel", MalformedSignature::MissingField("read"))]
    #[case("chr1\t5000\t5000\ttra\tr1", MalformedSignature::MissingMate)]
    #[case("chr1\t5000\t5000\tins_dup\tr1", MalformedSignature::MissingOrigin)]
    #[case("chr1\t5000\t5000\tins\tr1", MalformedSignature::ZeroLength)]
    #[case("chr1\t5000\t6000\tdup\tr1\tcopies=0", MalformedSignature::ZeroCopies)]
    #[case("chr1\t5000\t6000\ttra\tr1\tmate=chr2:10", MalformedSignature::NotAPoint("translocation"))]
    #[case("chr1\t0\t100000\tdup\tr1\tcopies=50000", MalformedSignature::SizeOverflow { span: 100000, copies: 50000 })]
    fn test_malformed_records(#[case] line: &str, #[case] expected: MalformedSignature) {
        assert_eq!(Signature::from_record(line), Err(expected));
    }

    #[rstest]
    fn test_canonicalize_mirrors_translocation() {
        let mut sig = Signature::translocation("2", 8000, "1", 5000, "r1");
        if let VariantKind::Translocation {
            orientation,
            mate_orientation,
            ..
        } = &mut sig.kind
        {
            *orientation = Orientation::Forward;
            *mate_orientation = Orientation::Reverse;
        }

        let canonical = sig.canonicalize();
        assert_eq!(canonical.chr, "1");
        assert_eq!(canonical.start, 5000);
        assert_eq!(
            canonical.kind,
            VariantKind::Translocation {
                mate: Breakend::new("2", 8000),
                orientation: Orientation::Forward,
                mate_orientation: Orientation::Reverse,
            }
        );
    }

    #[rstest]
    fn test_canonicalize_keeps_ordered_translocation() {
        let sig = Signature::translocation("1", 5000, "2", 8000, "r1");
        assert_eq!(sig.clone().canonicalize(), sig);
    }

    #[rstest]
    fn test_tandem_duplication_size() {
        let sig = Signature::tandem_duplication("chr1", 100, 400, 2, "r1");
        assert_eq!(sig.size(), Some(600));

        let huge = VariantKind::TandemDuplication { copies: u32::MAX };
        assert_eq!(huge.size(0, 10), Some(u32::MAX));
    }

    #[rstest]
    fn test_variant_type_names() {
        for variant_type in VariantType::ALL {
            assert_eq!(
                variant_type.short_name().parse::<VariantType>().unwrap(),
                variant_type
            );
            assert_eq!(variant_type.label().parse::<VariantType>().unwrap(), variant_type);
        }
    }
}
