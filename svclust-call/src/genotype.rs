use svclust_core::config::{GenotypeConfig, QualityConfig};
use svclust_core::models::{Call, Genotype};
use svclust_core::Diagnostic;

use crate::combine::CallCandidate;
use crate::depth::{DepthProvider, locus_depth};

///
/// Zygosity from the fraction of reads at the locus that support the event.
///
/// Returns [`Genotype::Unknown`] when depth is missing or below `min_depth`.
///
pub fn genotype(support: usize, depth: Option<u32>, config: &GenotypeConfig) -> Genotype {
    let depth = match depth {
        Some(depth) if depth > 0 && depth >= config.min_depth => depth,
        _ => return Genotype::Unknown,
    };

    let fraction = support as f64 / f64::from(depth);
    if fraction >= config.homozygous_fraction {
        Genotype::HomozygousAlt
    } else if fraction >= config.heterozygous_fraction {
        Genotype::Heterozygous
    } else {
        Genotype::HomozygousRef
    }
}

/// `round(max_quality * (1 - exp(-support / saturation)))`, clipped to `[0, max_quality]`.
pub fn quality(support: usize, config: &QualityConfig) -> u32 {
    let max_quality = f64::from(config.max_quality);
    let score = max_quality * (1.0 - (-(support as f64) / config.saturation).exp());
    score.round().clamp(0.0, max_quality) as u32
}

///
/// Turn a candidate into a [`Call`]. A diagnostic is returned alongside when the
/// locus depth is too low to genotype.
///
pub fn genotype_candidate(
    candidate: CallCandidate,
    depth: &dyn DepthProvider,
    genotyping: &GenotypeConfig,
    scoring: &QualityConfig,
) -> (Call, Option<Diagnostic>) {
    let support = candidate.support();
    let locus_depth = locus_depth(
        depth,
        &candidate.locus.chr,
        candidate.locus.start,
        candidate.locus.end,
        candidate.kind.is_point(),
    );
    let genotype = genotype(support, locus_depth, genotyping);

    let diagnostic = (genotype == Genotype::Unknown).then(|| Diagnostic::InsufficientDepth {
        locus: candidate.locus.clone(),
        variant_type: candidate.kind.variant_type(),
        depth: locus_depth,
        min_depth: genotyping.min_depth,
    });

    let call = Call {
        id: None,
        chr: candidate.locus.chr,
        start: candidate.locus.start,
        end: candidate.locus.end,
        kind: candidate.kind,
        genotype,
        support,
        depth: locus_depth,
        quality: quality(support, scoring),
        std_span: candidate.std_span,
        std_pos: candidate.std_pos,
        clusters: candidate.clusters,
    };

    (call, diagnostic)
}
