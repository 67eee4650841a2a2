//! # Output for svclust.
//!
//! Turns the unordered calls of a run into a numbered [`CallSet`] in reference
//! order and writes it as BED ([`BedWrite`]) or VCF ([`VcfWrite`]). The cluster
//! dump in [`cluster_bed`] writes the intermediate signature clusters per type.
//!
pub mod assembly;
pub mod bed;
pub mod cluster_bed;
pub mod error;
pub mod vcf;

// re-expose core functions
pub use assembly::*;
pub use bed::*;
pub use cluster_bed::*;
pub use error::*;
pub use vcf::*;
