//! Report renderers for library assessments.
//!
//! - [`terminal`] — colored summary box and tables; respects `--verbose` / `--quiet`.
//! - [`mermaid`] — Mermaid flowchart with one HTML table per library and per
//!   source-file license group.

pub mod mermaid;
pub mod terminal;
