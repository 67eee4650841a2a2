//! Core data model for svclust.
//!
//! This crate holds everything the clustering and calling crates share:
//!
//! - [`models::Signature`] and the [`models::SignatureStore`] that owns them for a run
//! - [`models::Cluster`] and [`models::Call`], the products of the calling pipeline
//! - [`models::ReferenceMetadata`], the ordered contig list used for output ordering
//! - [`config::RunConfig`], the explicit run configuration
//! - [`diagnostics::Diagnostic`], per-record problems reported back to the caller
//!
//! Nothing in here writes to a log or to disk on its own; callers decide what to do
//! with diagnostics and results.

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use config::RunConfig;
pub use diagnostics::Diagnostic;
pub use errors::{MalformedSignature, SvClustError};
