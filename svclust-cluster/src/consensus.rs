//! Consensus of a group of records: medians for positions and sizes, majority for
//! orientations, population standard deviations for the spread.

use std::collections::BTreeSet;

use svclust_core::models::{
    Breakend, Cluster, ClusterId, Consensus, Locus, Orientation, PartitionKey, SignatureId,
    SignatureStore, VariantKind,
};

///
/// Median of a list of positions. For an even count the two middle values are
/// averaged and rounded down. Returns 0 for an empty list.
///
pub fn median(values: &mut [u32]) -> u32 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        ((u64::from(values[mid - 1]) + u64::from(values[mid])) / 2) as u32
    }
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Majority vote; ties go to [`Orientation::Forward`].
fn majority(orientations: impl Iterator<Item = Orientation>) -> Orientation {
    let (forward, reverse) = orientations.fold((0usize, 0usize), |(f, r), o| match o {
        Orientation::Forward => (f + 1, r),
        Orientation::Reverse => (f, r + 1),
    });
    if reverse > forward {
        Orientation::Reverse
    } else {
        Orientation::Forward
    }
}

///
/// Representative locus and payload of records sharing one partition key.
///
/// Each record is `(start, end, kind)`. Start and end are the medians of the
/// record starts and ends; the payload is combined per kind.
///
pub fn consensus_kind(key: &PartitionKey, records: &[(u32, u32, &VariantKind)]) -> (Locus, VariantKind) {
    let mut starts: Vec<u32> = records.iter().map(|(s, _, _)| *s).collect();
    let mut ends: Vec<u32> = records.iter().map(|(_, e, _)| *e).collect();
    let start = median(&mut starts);
    let end = median(&mut ends).max(start);

    let kinds = records.iter().map(|(_, _, k)| *k);
    let kind = match records.first().map(|(_, _, k)| *k) {
        None | Some(VariantKind::Deletion) => VariantKind::Deletion,
        Some(VariantKind::Insertion { .. }) => {
            let mut lengths: Vec<u32> = kinds
                .filter_map(|k| match k {
                    VariantKind::Insertion { length } => Some(*length),
                    _ => None,
                })
                .collect();
            VariantKind::Insertion {
                length: median(&mut lengths),
            }
        }
        Some(VariantKind::Inversion { .. }) => {
            let orientations: BTreeSet<Option<Orientation>> = kinds
                .filter_map(|k| match k {
                    VariantKind::Inversion { orientation } => Some(*orientation),
                    _ => None,
                })
                .collect();
            // mixed or unknown orientations give no consensus orientation
            let orientation = match orientations.len() {
                1 => orientations.into_iter().next().flatten(),
                _ => None,
            };
            VariantKind::Inversion { orientation }
        }
        Some(VariantKind::TandemDuplication { .. }) => {
            let mut copies: Vec<u32> = kinds
                .filter_map(|k| match k {
                    VariantKind::TandemDuplication { copies } => Some(*copies),
                    _ => None,
                })
                .collect();
            VariantKind::TandemDuplication {
                copies: median(&mut copies).max(1),
            }
        }
        Some(VariantKind::Translocation { mate, .. }) => {
            let mut mate_positions = Vec::with_capacity(records.len());
            let mut orientations = Vec::with_capacity(records.len());
            let mut mate_orientations = Vec::with_capacity(records.len());
            for k in kinds {
                if let VariantKind::Translocation {
                    mate,
                    orientation,
                    mate_orientation,
                } = k
                {
                    mate_positions.push(mate.pos);
                    orientations.push(*orientation);
                    mate_orientations.push(*mate_orientation);
                }
            }
            let mate_chr = key.partner_chr.as_deref().unwrap_or(&mate.chr);
            VariantKind::Translocation {
                mate: Breakend::new(mate_chr, median(&mut mate_positions)),
                orientation: majority(orientations.into_iter()),
                mate_orientation: majority(mate_orientations.into_iter()),
            }
        }
        Some(VariantKind::InsertionFrom { origin }) => {
            let mut origin_starts = Vec::with_capacity(records.len());
            let mut origin_ends = Vec::with_capacity(records.len());
            for k in kinds {
                if let VariantKind::InsertionFrom { origin } = k {
                    origin_starts.push(origin.start);
                    origin_ends.push(origin.end);
                }
            }
            let origin_chr = key.partner_chr.as_deref().unwrap_or(&origin.chr);
            let origin_start = median(&mut origin_starts);
            let origin_end = median(&mut origin_ends).max(origin_start);
            VariantKind::InsertionFrom {
                origin: Locus::new(origin_chr, origin_start, origin_end),
            }
        }
    };

    let end = if kind.is_point() { start } else { end };
    (Locus::new(&key.chr, start, end), kind)
}

///
/// Build a [`Cluster`] from a group of signature ids.
///
/// Returns `None` when the group has fewer distinct reads than `min_support`.
///
pub fn build_cluster(
    store: &SignatureStore,
    id: ClusterId,
    key: &PartitionKey,
    members: Vec<SignatureId>,
    min_support: usize,
) -> Option<Cluster> {
    let reads: BTreeSet<String> = members
        .iter()
        .map(|m| store[*m].read.clone())
        .collect();
    if members.is_empty() || reads.len() < min_support {
        return None;
    }

    let records: Vec<(u32, u32, &VariantKind)> = members
        .iter()
        .map(|m| {
            let signature = &store[*m];
            (signature.start, signature.end, &signature.kind)
        })
        .collect();
    let (locus, kind) = consensus_kind(key, &records);

    let spans: Vec<f64> = members
        .iter()
        .map(|m| {
            let signature = &store[*m];
            f64::from(signature.size().unwrap_or(signature.end - signature.start))
        })
        .collect();
    let positions: Vec<f64> = members
        .iter()
        .map(|m| {
            let signature = &store[*m];
            (f64::from(signature.start) + f64::from(signature.end)) / 2.0
        })
        .collect();

    let consensus = Consensus {
        locus,
        kind,
        std_span: std_dev(&spans),
        std_pos: std_dev(&positions),
    };

    Some(Cluster::new(id, key.clone(), members, reads, consensus))
}
