//! Clustering of structural variant signatures.
//!
//! Signatures of one [`PartitionKey`](svclust_core::models::PartitionKey) are linked
//! whenever they are nearby (see [`linkage`]). Each connected group becomes a
//! [`Cluster`](svclust_core::models::Cluster) with a median-based consensus.
//!
//! # Example
//! ```rust
//! use svclust_core::models::{Signature, SignatureStore, SortOrder};
//! use svclust_cluster::cluster_store;
//!
//! let mut store = SignatureStore::new("reads", Some(SortOrder::Queryname));
//! store.insert(Signature::deletion("1", 1000, 1200, "r1"));
//! store.insert(Signature::deletion("1", 1010, 1190, "r2"));
//!
//! let clusters = cluster_store(&store, 50, 1);
//! assert_eq!(clusters.len(), 1);
//! assert_eq!(clusters[0].support(), 2);
//! ```

pub mod consensus;
pub mod linkage;
pub mod partition;
pub mod union_find;

// re-exports
pub use consensus::{build_cluster, consensus_kind, median, std_dev};
pub use linkage::{Anchor, link_components};
pub use partition::{cluster_partition, cluster_store};
pub use union_find::UnionFind;
