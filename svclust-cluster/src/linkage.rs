//! The "nearby" rule shared by signature clustering and cross-pass combining.
//!
//! Two records are nearby when their primary intervals overlap or the gap between
//! them is at most `d_max`. Records that carry a partner interval (the mate
//! breakend of a translocation, the origin of an insertion) must also have partner
//! intervals within `d_max` of each other.

use svclust_core::models::{Consensus, Signature, VariantKind, interval_gap};

use crate::union_find::UnionFind;

/// Positions a record is linked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Anchor {
    pub start: u32,
    pub end: u32,
    pub partner: Option<(u32, u32)>,
}

impl Anchor {
    pub fn new(start: u32, end: u32, kind: &VariantKind) -> Self {
        Anchor {
            start,
            end,
            partner: kind.partner_interval(),
        }
    }

    pub fn is_nearby(&self, other: &Anchor, d_max: u32) -> bool {
        if interval_gap(self.start, self.end, other.start, other.end) > d_max {
            return false;
        }
        match (self.partner, other.partner) {
            (Some((a_start, a_end)), Some((b_start, b_end))) => {
                interval_gap(a_start, a_end, b_start, b_end) <= d_max
            }
            (None, None) => true,
            _ => false,
        }
    }
}

impl From<&Signature> for Anchor {
    fn from(signature: &Signature) -> Self {
        Anchor::new(signature.start, signature.end, &signature.kind)
    }
}

impl From<&Consensus> for Anchor {
    fn from(consensus: &Consensus) -> Self {
        Anchor::new(consensus.locus.start, consensus.locus.end, &consensus.kind)
    }
}

///
/// Connected components of the nearby relation.
///
/// `anchors` must be sorted by start. Returns groups of indices into `anchors`,
/// ordered by their first member, each group ascending.
///
/// Without partner intervals a single sweep suffices: the active group is closed
/// once the next start lies beyond its rightmost end plus `d_max`. With partner
/// intervals, candidate pairs inside that window are checked individually and
/// joined with union-find.
///
pub fn link_components(anchors: &[Anchor], d_max: u32) -> Vec<Vec<usize>> {
    if anchors.is_empty() {
        return Vec::new();
    }

    if anchors.iter().all(|a| a.partner.is_none()) {
        sweep(anchors, d_max)
    } else {
        windowed_union(anchors, d_max)
    }
}

fn sweep(anchors: &[Anchor], d_max: u32) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = vec![0];
    let mut extent = anchors[0].end;

    for (i, anchor) in anchors.iter().enumerate().skip(1) {
        if u64::from(anchor.start) > u64::from(extent) + u64::from(d_max) {
            groups.push(std::mem::take(&mut current));
            extent = anchor.end;
        } else {
            extent = extent.max(anchor.end);
        }
        current.push(i);
    }
    groups.push(current);

    groups
}

fn windowed_union(anchors: &[Anchor], d_max: u32) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::new(anchors.len());

    for (i, a) in anchors.iter().enumerate() {
        let window_end = u64::from(a.end) + u64::from(d_max);
        for (j, b) in anchors.iter().enumerate().skip(i + 1) {
            if u64::from(b.start) > window_end {
                break;
            }
            if a.is_nearby(b, d_max) {
                uf.union(i, j);
            }
        }
    }

    uf.get_sets()
}
