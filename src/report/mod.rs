//! Report module - cluster summaries and exports

pub mod cluster_report;
pub mod json_export;

pub use cluster_report::*;
pub use json_export::*;
