use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::{Result, SvClustError};
use crate::utils::get_dynamic_reader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub name: String,
    pub length: u64,
}

///
/// Ordered contig list of the reference genome.
///
/// Used for VCF `##contig` lines and as the chromosome order of all output.
///
#[derive(Debug, Clone, Default)]
pub struct ReferenceMetadata {
    contigs: Vec<Contig>,
    ranks: HashMap<String, usize>,
    pub path: Option<PathBuf>,
}

/// Place of a chromosome missing from the reference. Variant order is the
/// output order; a `chr` prefix is ignored when classifying.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnplacedContig {
    Numbered(u32),
    X,
    Y,
    Mitochondrial,
    Named(String),
}

impl UnplacedContig {
    pub fn classify(chr: &str) -> Self {
        let name = chr.strip_prefix("chr").unwrap_or(chr);
        if let Ok(number) = name.parse::<u32>() {
            return UnplacedContig::Numbered(number);
        }
        match name {
            "X" => UnplacedContig::X,
            "Y" => UnplacedContig::Y,
            "M" | "MT" => UnplacedContig::Mitochondrial,
            other => UnplacedContig::Named(other.to_string()),
        }
    }
}

/// Reference contigs sort by rank; anything else follows all of them.
pub type ContigSortKey = (usize, Option<UnplacedContig>);

impl ReferenceMetadata {
    pub fn from_contigs(contigs: Vec<Contig>) -> Self {
        let ranks = contigs
            .iter()
            .enumerate()
            .map(|(rank, contig)| (contig.name.clone(), rank))
            .collect();
        ReferenceMetadata {
            contigs,
            ranks,
            path: None,
        }
    }

    pub fn contigs(&self) -> &[Contig] {
        &self.contigs
    }

    pub fn rank(&self, chr: &str) -> Option<usize> {
        self.ranks.get(chr).copied()
    }

    pub fn sort_key(&self, chr: &str) -> ContigSortKey {
        match self.rank(chr) {
            Some(rank) => (rank, None),
            None => (self.contigs.len(), Some(UnplacedContig::classify(chr))),
        }
    }

    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }
}

impl TryFrom<&Path> for ReferenceMetadata {
    type Error = SvClustError;

    ///
    /// Read a FASTA index (`.fai`) or chrom-sizes file: name in the first column,
    /// length in the second. Further columns are ignored.
    ///
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;
        let mut contigs: Vec<Contig> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('\t');
            let name = parts.next().unwrap_or_default();
            let length = parts
                .next()
                .ok_or_else(|| {
                    SvClustError::ReferenceParse(format!("missing length column in line: {}", line))
                })?
                .trim()
                .parse::<u64>()
                .map_err(|e| {
                    SvClustError::ReferenceParse(format!("invalid length in line '{}': {}", line, e))
                })?;

            contigs.push(Contig {
                name: name.to_string(),
                length,
            });
        }

        if contigs.is_empty() {
            return Err(SvClustError::EmptyReference(value.display().to_string()));
        }

        let mut reference = ReferenceMetadata::from_contigs(contigs);
        reference.path = Some(value.to_path_buf());
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    #[rstest]
    fn test_read_fai() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.fa.fai");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"chr2\t242193529\t6\t60\t61\nchr1\t248956422\t112\t60\t61\n")
            .unwrap();

        let reference = ReferenceMetadata::try_from(path.as_path()).unwrap();
        assert_eq!(reference.len(), 2);
        assert_eq!(reference.rank("chr2"), Some(0));
        assert_eq!(reference.rank("chr1"), Some(1));
        assert_eq!(reference.contigs()[1].length, 248956422);
    }

    #[rstest]
    fn test_empty_reference_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.fai");
        std::fs::File::create(&path).unwrap();

        let result = ReferenceMetadata::try_from(path.as_path());
        assert!(matches!(result, Err(SvClustError::EmptyReference(_))));
    }

    #[rstest]
    fn test_sort_key_unknown_after_known() {
        let reference = ReferenceMetadata::from_contigs(vec![
            Contig {
                name: "chr2".to_string(),
                length: 100,
            },
            Contig {
                name: "chr1".to_string(),
                length: 100,
            },
        ]);

        let mut chroms = vec!["chrX", "chr1", "chr3", "chr2"];
        chroms.sort_by_key(|c| reference.sort_key(c));
        assert_eq!(chroms, vec!["chr2", "chr1", "chr3", "chrX"]);
    }

    #[rstest]
    fn test_unplaced_contig_order() {
        let reference = ReferenceMetadata::from_contigs(vec![Contig {
            name: "chr5".to_string(),
            length: 100,
        }]);

        let mut chroms = vec!["chrX", "chr10", "chrM", "chr2", "chrUn_gl000220", "chr5", "chrY"];
        chroms.sort_by_key(|c| reference.sort_key(c));
        assert_eq!(
            chroms,
            vec!["chr5", "chr2", "chr10", "chrX", "chrY", "chrM", "chrUn_gl000220"]
        );
    }
}
