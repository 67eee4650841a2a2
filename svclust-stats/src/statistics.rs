//! Descriptive statistics over calls or clusters, grouped by variant type.

use std::collections::BTreeMap;

use svclust_core::models::{Call, Cluster, VariantType};

use crate::models::{Histogram, TypeStatistics};

pub const MAX_SUPPORT_BINS: usize = 100;

/// Anything with a variant type, an event size and a read support.
pub trait HasSize {
    fn variant_type(&self) -> VariantType;
    fn size(&self) -> Option<u32>;
    fn support(&self) -> usize;
}

impl HasSize for Call {
    fn variant_type(&self) -> VariantType {
        Call::variant_type(self)
    }

    fn size(&self) -> Option<u32> {
        self.length()
    }

    fn support(&self) -> usize {
        self.support
    }
}

impl HasSize for Cluster {
    fn variant_type(&self) -> VariantType {
        Cluster::variant_type(self)
    }

    fn size(&self) -> Option<u32> {
        Cluster::size(self)
    }

    fn support(&self) -> usize {
        Cluster::support(self)
    }
}

/// Statistics of a set of structural variant records.
pub trait VariantSetStatistics {
    /// Count, size range, mean / median size and mean support per variant type.
    /// Only types that occur are listed.
    fn type_statistics(&self) -> BTreeMap<VariantType, TypeStatistics>;

    /// Size histogram per variant type with at most `n_bins` bins. Types
    /// without a size (translocations) are skipped.
    fn size_histograms(&self, n_bins: usize) -> BTreeMap<VariantType, Histogram>;

    /// Support histogram per variant type, bin width 1 up to [`MAX_SUPPORT_BINS`] bins.
    fn support_histograms(&self) -> BTreeMap<VariantType, Histogram>;
}

fn group_by_type<T: HasSize>(items: &[T]) -> BTreeMap<VariantType, Vec<&T>> {
    let mut groups: BTreeMap<VariantType, Vec<&T>> = BTreeMap::new();
    for item in items {
        groups.entry(item.variant_type()).or_default().push(item);
    }
    groups
}

impl<T: HasSize> VariantSetStatistics for [T] {
    fn type_statistics(&self) -> BTreeMap<VariantType, TypeStatistics> {
        group_by_type(self)
            .into_iter()
            .map(|(variant_type, items)| {
                let mut sizes: Vec<u32> = items.iter().filter_map(|i| i.size()).collect();
                sizes.sort_unstable();

                let mean_size = (!sizes.is_empty()).then(|| {
                    sizes.iter().map(|s| f64::from(*s)).sum::<f64>() / sizes.len() as f64
                });
                let median_size = (!sizes.is_empty()).then(|| {
                    let mid = sizes.len() / 2;
                    if sizes.len() % 2 == 0 {
                        (f64::from(sizes[mid - 1]) + f64::from(sizes[mid])) / 2.0
                    } else {
                        f64::from(sizes[mid])
                    }
                });
                let mean_support =
                    items.iter().map(|i| i.support() as f64).sum::<f64>() / items.len() as f64;

                let statistics = TypeStatistics {
                    variant_type,
                    count: items.len(),
                    min_size: sizes.first().copied(),
                    max_size: sizes.last().copied(),
                    mean_size,
                    median_size,
                    mean_support,
                };
                (variant_type, statistics)
            })
            .collect()
    }

    fn size_histograms(&self, n_bins: usize) -> BTreeMap<VariantType, Histogram> {
        group_by_type(self)
            .into_iter()
            .filter_map(|(variant_type, items)| {
                let sizes: Vec<u32> = items.iter().filter_map(|i| i.size()).collect();
                (!sizes.is_empty()).then(|| (variant_type, Histogram::with_bins(&sizes, n_bins)))
            })
            .collect()
    }

    fn support_histograms(&self) -> BTreeMap<VariantType, Histogram> {
        group_by_type(self)
            .into_iter()
            .map(|(variant_type, items)| {
                let support: Vec<u32> = items
                    .iter()
                    .map(|i| u32::try_from(i.support()).unwrap_or(u32::MAX))
                    .collect();
                (variant_type, Histogram::of_support(&support, MAX_SUPPORT_BINS))
            })
            .collect()
    }
}
