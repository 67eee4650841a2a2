use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::io::BufRead;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::diagnostics::Diagnostic;
use crate::errors::{Result, SvClustError};
use crate::models::signature::{PartitionKey, Signature, SignatureId};
use crate::utils::{get_dynamic_reader, pass_name_from_path};

/// Declared sort order of the alignments a signature file was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Queryname,
    Coordinate,
    Unsorted,
    Unknown,
}

impl FromStr for SortOrder {
    type Err = SvClustError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "queryname" => Ok(SortOrder::Queryname),
            "coordinate" => Ok(SortOrder::Coordinate),
            "unsorted" => Ok(SortOrder::Unsorted),
            "unknown" => Ok(SortOrder::Unknown),
            other => Err(SvClustError::InputOrder {
                pass: String::new(),
                found: other.to_string(),
            }),
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortOrder::Queryname => "queryname",
            SortOrder::Coordinate => "coordinate",
            SortOrder::Unsorted => "unsorted",
            SortOrder::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Scanning strategy the upstream pass used, derived from the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    Queryname,
    Coordinate,
}

///
/// All signatures of one evidence pass. The store owns the records; clusters
/// refer to them by [`SignatureId`].
///
#[derive(Debug, Clone)]
pub struct SignatureStore {
    pub name: String,
    pub sort_order: Option<SortOrder>,
    pub path: Option<PathBuf>,
    signatures: Vec<Signature>,
    diagnostics: Vec<Diagnostic>,
}

impl SignatureStore {
    pub fn new(name: &str, sort_order: Option<SortOrder>) -> Self {
        SignatureStore {
            name: name.to_string(),
            sort_order,
            path: None,
            signatures: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    ///
    /// Validate and store a signature. Translocations are stored in canonical
    /// orientation. Invalid records are not stored; a diagnostic is kept instead.
    ///
    pub fn insert(&mut self, signature: Signature) -> Option<SignatureId> {
        match signature.validate() {
            Ok(()) => {
                let id = SignatureId(self.signatures.len());
                self.signatures.push(signature.canonicalize());
                Some(id)
            }
            Err(reason) => {
                self.diagnostics.push(Diagnostic::MalformedSignature {
                    pass: self.name.clone(),
                    line: None,
                    record: signature.to_string(),
                    reason,
                });
                None
            }
        }
    }

    ///
    /// Load a signature file under an explicit pass name.
    ///
    /// Lines that fail to parse are dropped and reported through
    /// [`SignatureStore::diagnostics`].
    ///
    pub fn from_path(path: &Path, name: &str) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let mut store = SignatureStore::new(name, None);
        store.path = Some(path.to_path_buf());

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('#') {
                if let Some(order) = header.trim().strip_prefix("sort_order=") {
                    store.sort_order = Some(order.parse().unwrap_or(SortOrder::Unknown));
                }
                continue;
            }

            match Signature::from_record(line) {
                Ok(signature) => {
                    store.insert(signature);
                }
                Err(reason) => store.diagnostics.push(Diagnostic::MalformedSignature {
                    pass: store.name.clone(),
                    line: Some(index + 1),
                    record: line.to_string(),
                    reason,
                }),
            }
        }

        log::debug!(
            "Loaded {} signatures for pass '{}' from {}",
            store.len(),
            store.name,
            path.display()
        );

        Ok(store)
    }

    ///
    /// Check the declared sort order. Queryname- and coordinate-sorted input is
    /// accepted; anything else is an [`SvClustError::InputOrder`].
    ///
    pub fn scan_strategy(&self) -> Result<ScanStrategy> {
        match self.sort_order {
            Some(SortOrder::Queryname) => Ok(ScanStrategy::Queryname),
            Some(SortOrder::Coordinate) => Ok(ScanStrategy::Coordinate),
            Some(other) => Err(SvClustError::InputOrder {
                pass: self.name.clone(),
                found: other.to_string(),
            }),
            None => Err(SvClustError::InputOrder {
                pass: self.name.clone(),
                found: "missing".to_string(),
            }),
        }
    }

    ///
    /// Group signature ids by partition key. Ids within a partition keep
    /// insertion order; partitions iterate in key order.
    ///
    pub fn partitions(&self) -> BTreeMap<PartitionKey, Vec<SignatureId>> {
        let mut partitions: BTreeMap<PartitionKey, Vec<SignatureId>> = BTreeMap::new();
        for (index, signature) in self.signatures.iter().enumerate() {
            partitions
                .entry(signature.partition_key())
                .or_default()
                .push(SignatureId(index));
        }
        partitions
    }

    pub fn get(&self, id: SignatureId) -> Option<&Signature> {
        self.signatures.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Index<SignatureId> for SignatureStore {
    type Output = Signature;

    fn index(&self, id: SignatureId) -> &Self::Output {
        &self.signatures[id.0]
    }
}

impl TryFrom<&Path> for SignatureStore {
    type Error = SvClustError;

    ///
    /// Load a signature file, naming the pass after the file.
    ///
    /// # Arguments:
    /// - value: path to a signature file on disk, plain or gzip'd.
    fn try_from(value: &Path) -> Result<Self> {
        SignatureStore::from_path(value, &pass_name_from_path(value))
    }
}

impl TryFrom<PathBuf> for SignatureStore {
    type Error = SvClustError;

    fn try_from(value: PathBuf) -> Result<Self> {
        SignatureStore::try_from(value.as_path())
    }
}
