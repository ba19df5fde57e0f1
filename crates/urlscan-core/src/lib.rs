//! urlscan-core — shared library for malicious URL scanning.
//!
//! Provides lexical URL splitting, public-suffix resolution, feature
//! extraction, ONNX inference, scan orchestration, and result reporting
//! used by the CLI frontend.

pub mod features;
pub mod inference;
pub mod report;
pub mod scan;
pub mod suffix;
pub mod urlparts;
