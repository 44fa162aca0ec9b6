//! License inclusion model.
//!
//! - [`relation`] — directed graph of "narrower license → wider license" edges
//!   with inclusion and most-restrictive queries.
//! - [`table`] — the curated relation table the graph is built from.

pub mod relation;
pub mod table;

/// Sentinel key for files where the scanner found no license.
pub const NO_LICENSE: &str = "NoLicense";

/// Verdict reported when no license could be settled on.
pub const UNKNOWN_LICENSE: &str = "Unknown";
