use std::fmt::{self, Display};

use serde::Serialize;

use crate::models::cluster::ClusterId;
use crate::models::locus::Locus;
use crate::models::signature::{VariantKind, VariantType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Genotype {
    HomozygousAlt,
    Heterozygous,
    HomozygousRef,
    Unknown,
}

impl Genotype {
    /// VCF `GT` value.
    pub fn as_vcf(&self) -> &'static str {
        match self {
            Genotype::HomozygousAlt => "1/1",
            Genotype::Heterozygous => "0/1",
            Genotype::HomozygousRef => "0/0",
            Genotype::Unknown => "./.",
        }
    }
}

impl Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_vcf())
    }
}

///
/// A genotyped structural variant.
///
/// `id` stays `None` until the output assembler numbers the final call set.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub id: Option<String>,
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub kind: VariantKind,
    pub genotype: Genotype,
    pub support: usize,
    pub depth: Option<u32>,
    pub quality: u32,
    pub std_span: f64,
    pub std_pos: f64,
    pub clusters: Vec<ClusterId>,
}

impl Call {
    pub fn variant_type(&self) -> VariantType {
        self.kind.variant_type()
    }

    /// Event length; `None` for translocations.
    pub fn length(&self) -> Option<u32> {
        self.kind.size(self.start, self.end)
    }

    pub fn locus(&self) -> Locus {
        Locus::new(&self.chr, self.start, self.end)
    }

    pub fn is_point(&self) -> bool {
        self.kind.is_point()
    }

    pub fn with_id(self, id: String) -> Self {
        Call {
            id: Some(id),
            ..self
        }
    }
}
