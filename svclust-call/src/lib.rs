//! Structural variant calling from clustered signatures.
//!
//! [`call_structural_variants`] is the entry point: it clusters every evidence pass,
//! merges clusters describing the same event across passes and genotypes the
//! result against an optional [`DepthProvider`].

pub mod combine;
pub mod depth;
pub mod genotype;
pub mod pipeline;

// re-exports
pub use combine::{CallCandidate, combine_clusters};
pub use depth::{DepthProvider, DepthTable, NoDepth, locus_depth};
pub use genotype::{genotype, genotype_candidate, quality};
pub use pipeline::{CallReport, ClusterReport, call_structural_variants, cluster_signatures};
