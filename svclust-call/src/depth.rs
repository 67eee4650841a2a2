use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashMap;

use svclust_core::errors::{Result, SvClustError};
use svclust_core::utils::get_dynamic_reader;

///
/// Source of total read depth at a position.
///
pub trait DepthProvider {
    /// Read depth at `chr:pos`, or `None` when it is not known.
    fn depth_at(&self, chr: &str, pos: u32) -> Option<u32>;
}

/// Depth is never available; every call is genotyped as unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDepth;

impl DepthProvider for NoDepth {
    fn depth_at(&self, _chr: &str, _pos: u32) -> Option<u32> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DepthWindow {
    start: u32,
    end: u32,
    depth: u32,
}

///
/// Depth windows per chromosome, as written by coverage tools in BED-like
/// `chr  start  end  depth` form. Windows are expected not to overlap.
///
#[derive(Debug, Clone, Default)]
pub struct DepthTable {
    windows: FxHashMap<String, Vec<DepthWindow>>,
}

impl DepthTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chr: &str, start: u32, end: u32, depth: u32) {
        let windows = self.windows.entry(chr.to_string()).or_default();
        let window = DepthWindow { start, end, depth };
        let idx = windows.partition_point(|w| w.start <= start);
        windows.insert(idx, window);
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl DepthProvider for DepthTable {
    fn depth_at(&self, chr: &str, pos: u32) -> Option<u32> {
        let windows = self.windows.get(chr)?;
        let idx = windows.partition_point(|w| w.start <= pos);
        let window = windows.get(idx.checked_sub(1)?)?;
        (pos < window.end).then_some(window.depth)
    }
}

impl TryFrom<&Path> for DepthTable {
    type Error = SvClustError;

    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;
        let mut table = DepthTable::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 4 {
                return Err(SvClustError::DepthParse(format!(
                    "line {} has {} columns, expected chr, start, end, depth",
                    index + 1,
                    parts.len()
                )));
            }

            let parse = |field: &str, name: &str| -> Result<u32> {
                // coverage tools sometimes write fractional depth
                field
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map(|v| v.round() as u32)
                    .ok_or_else(|| {
                        SvClustError::DepthParse(format!(
                            "invalid {} '{}' at line {}",
                            name,
                            field,
                            index + 1
                        ))
                    })
            };

            table.insert(
                parts[0],
                parse(parts[1], "start")?,
                parse(parts[2], "end")?,
                parse(parts[3], "depth")?,
            );
        }

        Ok(table)
    }
}

///
/// Depth at a call locus: the mean of the depths at both breakpoints for interval
/// calls (`start` and `end - 1`), the depth at `start` for point calls.
///
pub fn locus_depth(
    provider: &dyn DepthProvider,
    chr: &str,
    start: u32,
    end: u32,
    is_point: bool,
) -> Option<u32> {
    let first = provider.depth_at(chr, start)?;
    if is_point || end <= start + 1 {
        return Some(first);
    }
    let second = provider.depth_at(chr, end - 1)?;
    Some(((u64::from(first) + u64::from(second)) / 2) as u32)
}
