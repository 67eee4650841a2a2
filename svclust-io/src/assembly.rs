use std::collections::BTreeMap;

use svclust_core::models::{Call, ReferenceMetadata, VariantKind, VariantType};

///
/// The final, ordered and numbered call set of a run.
///
/// Calls are sorted by reference contig order, then start, end, type and second
/// locus. Ids are `svclust.<TYPE>.<n>` with one counter per type, counted in
/// output order.
///
#[derive(Debug, Clone)]
pub struct CallSet {
    calls: Vec<Call>,
    reference: ReferenceMetadata,
}

/// Tie-breaker for calls at the same position: the second locus, if any.
fn partner_key(kind: &VariantKind) -> Option<(&str, u32, u32)> {
    match kind {
        VariantKind::Translocation { mate, .. } => Some((&mate.chr, mate.pos, mate.pos)),
        VariantKind::InsertionFrom { origin } => Some((&origin.chr, origin.start, origin.end)),
        _ => None,
    }
}

/// Type tag used in call ids.
pub fn id_tag(variant_type: VariantType) -> String {
    variant_type.label().replace(':', "_")
}

impl CallSet {
    pub fn assemble(mut calls: Vec<Call>, reference: &ReferenceMetadata) -> Self {
        calls.sort_by(|a, b| {
            (
                reference.sort_key(&a.chr),
                a.start,
                a.end,
                a.variant_type(),
                partner_key(&a.kind),
            )
                .cmp(&(
                    reference.sort_key(&b.chr),
                    b.start,
                    b.end,
                    b.variant_type(),
                    partner_key(&b.kind),
                ))
        });

        let mut counters: BTreeMap<VariantType, usize> = BTreeMap::new();
        let calls = calls
            .into_iter()
            .map(|call| {
                let variant_type = call.variant_type();
                let counter = counters.entry(variant_type).or_insert(0);
                *counter += 1;
                let id = format!("svclust.{}.{}", id_tag(variant_type), counter);
                call.with_id(id)
            })
            .collect();

        CallSet {
            calls,
            reference: reference.clone(),
        }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn reference(&self) -> &ReferenceMetadata {
        &self.reference
    }

    pub fn iter(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tests_support::call;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use svclust_core::models::{Breakend, Contig, Orientation};

    #[fixture]
    fn reference() -> ReferenceMetadata {
        ReferenceMetadata::from_contigs(vec![
            Contig {
                name: "chr2".to_string(),
                length: 100_000,
            },
            Contig {
                name: "chr1".to_string(),
                length: 100_000,
            },
        ])
    }

    #[rstest]
    fn test_order_follows_reference(reference: ReferenceMetadata) {
        let calls = vec![
            call("chr1", 500, 900, VariantKind::Deletion),
            call("chrUn", 10, 20, VariantKind::Deletion),
            call("chr2", 7000, 7000, VariantKind::Insertion { length: 50 }),
            call("chr1", 100, 300, VariantKind::Deletion),
            call("chr2", 100, 400, VariantKind::Inversion { orientation: None }),
        ];

        let set = CallSet::assemble(calls, &reference);
        let order: Vec<(String, u32)> = set.iter().map(|c| (c.chr.clone(), c.start)).collect();
        assert_eq!(
            order,
            vec![
                ("chr2".to_string(), 100),
                ("chr2".to_string(), 7000),
                ("chr1".to_string(), 100),
                ("chr1".to_string(), 500),
                ("chrUn".to_string(), 10),
            ]
        );

        let ids: Vec<&str> = set.iter().filter_map(|c| c.id.as_deref()).collect();
        assert_eq!(
            ids,
            vec![
                "svclust.INV.1",
                "svclust.INS.1",
                "svclust.DEL.1",
                "svclust.DEL.2",
                "svclust.DEL.3"
            ]
        );
    }

    #[rstest]
    fn test_translocations_order_by_mate(reference: ReferenceMetadata) {
        let bnd = |mate_chr: &str, mate_pos: u32| VariantKind::Translocation {
            mate: Breakend::new(mate_chr, mate_pos),
            orientation: Orientation::Forward,
            mate_orientation: Orientation::Forward,
        };
        let calls = vec![
            call("chr1", 500, 500, bnd("chr3", 900)),
            call("chr1", 500, 500, bnd("chr2", 900)),
        ];

        let set = CallSet::assemble(calls, &reference);
        let mates: Vec<String> = set
            .iter()
            .map(|c| match &c.kind {
                VariantKind::Translocation { mate, .. } => mate.chr.clone(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(mates, vec!["chr2", "chr3"]);
        assert_eq!(set.calls()[1].id.as_deref(), Some("svclust.BND.2"));
    }
}
