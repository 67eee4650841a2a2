use std::collections::BTreeSet;
use std::fmt::{self, Display};

use serde::Serialize;

use crate::models::locus::Locus;
use crate::models::signature::{PartitionKey, SignatureId, VariantKind, VariantType};

/// Identifies a cluster: the evidence pass it came from and its index in that pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClusterId {
    pub pass: String,
    pub index: usize,
}

impl Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.pass, self.index)
    }
}

///
/// Representative event of a group of records.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consensus {
    pub locus: Locus,
    pub kind: VariantKind,
    pub std_span: f64,
    pub std_pos: f64,
}

impl Consensus {
    pub fn size(&self) -> Option<u32> {
        self.kind.size(self.locus.start, self.locus.end)
    }
}

///
/// A group of signatures of one partition judged to describe the same event.
///
/// Members are ids into the [`SignatureStore`](crate::models::SignatureStore) of the
/// cluster's pass. The consensus is computed once when the cluster is built.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: ClusterId,
    key: PartitionKey,
    members: Vec<SignatureId>,
    reads: BTreeSet<String>,
    consensus: Consensus,
}

impl Cluster {
    pub fn new(
        id: ClusterId,
        key: PartitionKey,
        members: Vec<SignatureId>,
        reads: BTreeSet<String>,
        consensus: Consensus,
    ) -> Self {
        Cluster {
            id,
            key,
            members,
            reads,
            consensus,
        }
    }

    pub fn id(&self) -> &ClusterId {
        &self.id
    }

    pub fn key(&self) -> &PartitionKey {
        &self.key
    }

    pub fn members(&self) -> &[SignatureId] {
        &self.members
    }

    pub fn reads(&self) -> &BTreeSet<String> {
        &self.reads
    }

    /// Number of distinct supporting reads.
    pub fn support(&self) -> usize {
        self.reads.len()
    }

    pub fn consensus(&self) -> &Consensus {
        &self.consensus
    }

    pub fn locus(&self) -> &Locus {
        &self.consensus.locus
    }

    pub fn kind(&self) -> &VariantKind {
        &self.consensus.kind
    }

    pub fn variant_type(&self) -> VariantType {
        self.key.variant_type
    }

    pub fn size(&self) -> Option<u32> {
        self.consensus.size()
    }

    pub fn std_span(&self) -> f64 {
        self.consensus.std_span
    }

    pub fn std_pos(&self) -> f64 {
        self.consensus.std_pos
    }
}
