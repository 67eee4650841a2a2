//! Structured, non-fatal problems found during a run.
//!
//! Library code only collects these. The CLI decides how to surface them.

use std::fmt::{self, Display};

use log::Level;
use serde::Serialize;

use crate::errors::MalformedSignature;
use crate::models::{Locus, VariantType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Diagnostic {
    /// No signatures in any evidence pass.
    EmptyEvidence,

    /// Signatures were scanned from coordinate-sorted alignments.
    DegradedSortOrder { pass: String },

    /// A record was dropped; `line` is set when it came from a file.
    MalformedSignature {
        pass: String,
        line: Option<usize>,
        record: String,
        #[serde(serialize_with = "serialize_reason")]
        reason: MalformedSignature,
    },

    /// Depth at a call locus is missing or too low to genotype.
    InsufficientDepth {
        locus: Locus,
        variant_type: VariantType,
        depth: Option<u32>,
        min_depth: u32,
    },
}

fn serialize_reason<S: serde::Serializer>(
    reason: &MalformedSignature,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&reason.to_string())
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::EmptyEvidence => Level::Warn,
            Diagnostic::DegradedSortOrder { .. } => Level::Warn,
            Diagnostic::MalformedSignature { .. } => Level::Warn,
            Diagnostic::InsufficientDepth { .. } => Level::Debug,
        }
    }

    /// Write this diagnostic to the `log` facade at its level.
    pub fn emit(&self) {
        log::log!(self.level(), "{}", self);
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyEvidence => {
                write!(f, "No signatures found in any evidence pass, no calls will be made")
            }
            Diagnostic::DegradedSortOrder { pass } => write!(
                f,
                "Signatures of pass '{}' were scanned from coordinate-sorted alignments. Queryname-sorted input gives more accurate signatures",
                pass
            ),
            Diagnostic::MalformedSignature {
                pass,
                line,
                record,
                reason,
            } => match line {
                Some(line) => write!(
                    f,
                    "Dropped malformed signature in pass '{}' at line {} ({}): {}",
                    pass, line, reason, record
                ),
                None => write!(
                    f,
                    "Dropped malformed signature in pass '{}' ({}): {}",
                    pass, reason, record
                ),
            },
            Diagnostic::InsufficientDepth {
                locus,
                variant_type,
                depth,
                min_depth,
            } => match depth {
                Some(depth) => write!(
                    f,
                    "Depth {} at {} {} is below {}, genotype set to unknown",
                    depth, variant_type, locus, min_depth
                ),
                None => write!(
                    f,
                    "No depth available at {} {}, genotype set to unknown",
                    variant_type, locus
                ),
            },
        }
    }
}
