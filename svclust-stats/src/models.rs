use serde::Serialize;

use svclust_core::models::VariantType;

/// Summary of the calls (or clusters) of one variant type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStatistics {
    pub variant_type: VariantType,
    /// Number of records of this type
    pub count: usize,
    /// Smallest event size, `None` for types without a size
    pub min_size: Option<u32>,
    /// Largest event size
    pub max_size: Option<u32>,
    /// Average event size
    pub mean_size: Option<f64>,
    /// Median event size
    pub median_size: Option<f64>,
    /// Average number of supporting reads
    pub mean_support: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower bound
    pub start: u32,
    /// Exclusive upper bound
    pub end: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub bin_width: u32,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    ///
    /// Histogram with at most `n_bins` equally wide bins starting at the minimum
    /// value. Every value falls into exactly one bin.
    ///
    pub fn with_bins(values: &[u32], n_bins: usize) -> Self {
        let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
            return Histogram {
                bin_width: 1,
                bins: Vec::new(),
            };
        };
        let n_bins = n_bins.max(1) as u64;
        let range = u64::from(*max) - u64::from(*min) + 1;
        let bin_width = range.div_ceil(n_bins).max(1);
        Self::with_width(values, u64::from(*min), bin_width)
    }

    ///
    /// Histogram of support values: one bin per value from 1 to the maximum,
    /// widened so that there are never more than `max_bins` bins.
    ///
    pub fn of_support(values: &[u32], max_bins: usize) -> Self {
        let Some(max) = values.iter().max() else {
            return Histogram {
                bin_width: 1,
                bins: Vec::new(),
            };
        };
        let bin_width = u64::from(*max).div_ceil(max_bins.max(1) as u64).max(1);
        Self::with_width(values, 1, bin_width)
    }

    fn with_width(values: &[u32], first: u64, bin_width: u64) -> Self {
        let max = values.iter().max().map(|m| u64::from(*m)).unwrap_or(first);
        let n_bins = ((max.saturating_sub(first)) / bin_width + 1) as usize;

        let mut counts = vec![0usize; n_bins];
        for value in values {
            let offset = u64::from(*value).saturating_sub(first);
            counts[(offset / bin_width) as usize] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let start = first + i as u64 * bin_width;
                HistogramBin {
                    start: start as u32,
                    end: (start + bin_width).min(u64::from(u32::MAX)) as u32,
                    count,
                }
            })
            .collect();

        Histogram {
            bin_width: bin_width as u32,
            bins,
        }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}
