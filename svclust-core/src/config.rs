use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SvClustError};

pub const DEFAULT_MAX_DISTANCE: u32 = 500;
pub const DEFAULT_MAX_DISTANCE_NANOPORE: u32 = 1000;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aligner {
    #[default]
    Ngmlr,
    Minimap2,
}

impl Aligner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aligner::Ngmlr => "ngmlr",
            Aligner::Minimap2 => "minimap2",
        }
    }
}

impl std::str::FromStr for Aligner {
    type Err = SvClustError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ngmlr" => Ok(Aligner::Ngmlr),
            "minimap2" => Ok(Aligner::Minimap2),
            other => Err(SvClustError::InvalidConfig(format!(
                "unknown aligner '{}', expected ngmlr or minimap2",
                other
            ))),
        }
    }
}

/// Support-fraction bands used for genotyping.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenotypeConfig {
    pub homozygous_fraction: f64,
    pub heterozygous_fraction: f64,
    pub min_depth: u32,
}

impl Default for GenotypeConfig {
    fn default() -> Self {
        GenotypeConfig {
            homozygous_fraction: 0.8,
            heterozygous_fraction: 0.2,
            min_depth: 4,
        }
    }
}

/// `quality = round(max_quality * (1 - exp(-support / saturation)))`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct QualityConfig {
    pub max_quality: u32,
    pub saturation: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        QualityConfig {
            max_quality: 100,
            saturation: 8.0,
        }
    }
}

///
/// Everything a run needs, passed explicitly into the pipeline.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum linking distance. Falls back to a read-technology default when unset.
    pub max_distance: Option<u32>,
    pub min_support: usize,
    pub working_dir: PathBuf,
    pub sample_id: String,
    pub threads: usize,
    pub aligner: Aligner,
    pub nanopore: bool,
    pub genotyping: GenotypeConfig,
    pub quality: QualityConfig,
    pub write_cluster_beds: bool,
    pub write_histograms: bool,
    pub histogram_bins: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_distance: None,
            min_support: 1,
            working_dir: PathBuf::from("."),
            sample_id: "Sample".to_string(),
            threads: 1,
            aligner: Aligner::default(),
            nanopore: false,
            genotyping: GenotypeConfig::default(),
            quality: QualityConfig::default(),
            write_cluster_beds: true,
            write_histograms: true,
            histogram_bins: 20,
        }
    }
}

impl RunConfig {
    /// Effective linking distance.
    pub fn max_distance(&self) -> u32 {
        match (self.max_distance, self.nanopore) {
            (Some(distance), _) => distance,
            (None, true) => DEFAULT_MAX_DISTANCE_NANOPORE,
            (None, false) => DEFAULT_MAX_DISTANCE,
        }
    }

    ///
    /// Reject inconsistent settings.
    ///
    pub fn validate(&self) -> Result<()> {
        let genotyping = &self.genotyping;
        for (name, value) in [
            ("homozygous_fraction", genotyping.homozygous_fraction),
            ("heterozygous_fraction", genotyping.heterozygous_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SvClustError::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        if genotyping.heterozygous_fraction >= genotyping.homozygous_fraction {
            return Err(SvClustError::InvalidConfig(format!(
                "heterozygous_fraction ({}) must be lower than homozygous_fraction ({})",
                genotyping.heterozygous_fraction, genotyping.homozygous_fraction
            )));
        }
        if self.threads == 0 {
            return Err(SvClustError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.quality.max_quality == 0 {
            return Err(SvClustError::InvalidConfig(
                "max_quality must be positive".to_string(),
            ));
        }
        if !(self.quality.saturation > 0.0) {
            return Err(SvClustError::InvalidConfig(format!(
                "saturation must be positive, got {}",
                self.quality.saturation
            )));
        }
        if self.histogram_bins == 0 {
            return Err(SvClustError::InvalidConfig(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<&Path> for RunConfig {
    type Error = SvClustError;

    fn try_from(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)?;
        let config: RunConfig = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
