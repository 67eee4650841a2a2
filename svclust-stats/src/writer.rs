use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use svclust_core::models::VariantType;

use crate::errors::Result;
use crate::models::{Histogram, TypeStatistics};
use crate::statistics::{HasSize, VariantSetStatistics};

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Serialize)]
struct Summary<'a> {
    total: usize,
    types: Vec<&'a TypeStatistics>,
}

fn write_histogram(path: &Path, histogram: &Histogram) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "start\tend\tcount")?;
    for bin in &histogram.bins {
        writeln!(writer, "{}\t{}\t{}", bin.start, bin.end, bin.count)?;
    }
    writer.flush()?;
    Ok(())
}

///
/// Write `size_<type>.tsv` and `support_<type>.tsv` for every variant type
/// present in `items`, plus a `summary.json` with the per-type statistics.
/// Returns the paths written, summary last.
///
pub fn write_statistics<T: HasSize>(dir: &Path, items: &[T], n_bins: usize) -> Result<Vec<PathBuf>> {
    create_dir_all(dir)?;
    let mut written = Vec::new();

    let histograms: [(&str, BTreeMap<VariantType, Histogram>); 2] = [
        ("size", items.size_histograms(n_bins)),
        ("support", items.support_histograms()),
    ];
    for (prefix, per_type) in &histograms {
        for (variant_type, histogram) in per_type {
            let path = dir.join(format!("{}_{}.tsv", prefix, variant_type.short_name()));
            write_histogram(&path, histogram)?;
            written.push(path);
        }
    }

    let statistics = items.type_statistics();
    let summary = Summary {
        total: items.len(),
        types: statistics.values().collect(),
    };
    let path = dir.join(SUMMARY_FILE);
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, &summary)?;
    writer.flush()?;
    written.push(path);

    Ok(written)
}
