pub mod call;
pub mod cluster;
pub mod locus;
pub mod reference;
pub mod signature;
pub mod signature_store;

// re-export for cleaner imports
pub use self::call::{Call, Genotype};
pub use self::cluster::{Cluster, ClusterId, Consensus};
pub use self::locus::{Breakend, Locus, interval_gap};
pub use self::reference::{Contig, ContigSortKey, ReferenceMetadata, UnplacedContig};
pub use self::signature::{
    Orientation, PartitionKey, Signature, SignatureId, VariantKind, VariantType,
};
pub use self::signature_store::{ScanStrategy, SignatureStore, SortOrder};
