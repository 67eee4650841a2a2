use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Serialize;

use crate::errors::MalformedSignature;

///
/// A half-open interval `[start, end)` on one chromosome.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord, Serialize)]
pub struct Locus {
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

impl Locus {
    pub fn new(chr: &str, start: u32, end: u32) -> Self {
        Locus {
            chr: chr.to_string(),
            start,
            end,
        }
    }

    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    pub fn mid_point(&self) -> u32 {
        self.start + self.width() / 2
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Gap between two loci on the same chromosome, zero when they overlap.
    /// `None` for loci on different chromosomes.
    pub fn gap_to(&self, other: &Locus) -> Option<u32> {
        if self.chr != other.chr {
            return None;
        }
        Some(interval_gap(self.start, self.end, other.start, other.end))
    }
}

impl Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}

impl FromStr for Locus {
    type Err = MalformedSignature;

    /// Parse `chr:start-end`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chr, range) = s
            .rsplit_once(':')
            .ok_or_else(|| MalformedSignature::InvalidAttribute(s.to_string()))?;
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| MalformedSignature::InvalidAttribute(s.to_string()))?;

        let start = parse_position(start, "origin start")?;
        let end = parse_position(end, "origin end")?;
        if start > end {
            return Err(MalformedSignature::InvertedInterval { start, end });
        }

        Ok(Locus::new(chr, start, end))
    }
}

///
/// One side of a novel adjacency: a single position on a chromosome.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord, Serialize)]
pub struct Breakend {
    pub chr: String,
    pub pos: u32,
}

impl Breakend {
    pub fn new(chr: &str, pos: u32) -> Self {
        Breakend {
            chr: chr.to_string(),
            pos,
        }
    }
}

impl Display for Breakend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chr, self.pos)
    }
}

impl FromStr for Breakend {
    type Err = MalformedSignature;

    /// Parse `chr:pos`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chr, pos) = s
            .rsplit_once(':')
            .ok_or_else(|| MalformedSignature::InvalidAttribute(s.to_string()))?;
        if chr.is_empty() {
            return Err(MalformedSignature::MissingMate);
        }
        Ok(Breakend::new(chr, parse_position(pos, "mate position")?))
    }
}

/// Gap between `[a_start, a_end)` and `[b_start, b_end)`; overlapping or touching
/// intervals have a gap of zero. Point intervals (`start == end`) reduce this to the
/// absolute position difference.
pub fn interval_gap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> u32 {
    if b_start > a_end {
        b_start - a_end
    } else if a_start > b_end {
        a_start - b_end
    } else {
        0
    }
}

pub(crate) fn parse_position(value: &str, field: &'static str) -> Result<u32, MalformedSignature> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| MalformedSignature::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
