//! # Statistics of svclust results
//!
//! Per variant type counts, size and support summaries for final calls or
//! intermediate clusters, and the histogram files written next to them.
//!
//! ```rust,ignore
//! use svclust_stats::{VariantSetStatistics, write_statistics};
//!
//! let per_type = calls.type_statistics();
//! write_statistics(Path::new("out/histograms"), &calls, 20)?;
//! ```
pub mod errors;
pub mod models;
pub mod statistics;
pub mod writer;

pub use errors::*;
pub use models::*;
pub use statistics::*;
pub use writer::*;
