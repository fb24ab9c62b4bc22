//! # stabrs-core
//!
//! Shared building blocks for the stabrs workspace: the models that flow between
//! crates ([`models::Read`], [`models::Interval`], [`models::Locus`],
//! [`models::Coverage`]), record errors, and gzip-aware readers and writers.
//!
//! ```rust
//! use stabrs_core::models::{Interval, Read};
//!
//! let read = Read::new(100, 7);
//! let interval = Interval::from(read);
//! assert!(interval.contains(107));
//! ```
pub mod errors;
pub mod models;
pub mod utils;

pub mod consts {
    pub const START_COL_NAME: &str = "start";
    pub const LENGTH_COL_NAME: &str = "length";
    pub const POSITION_COL_NAME: &str = "position";
    pub const COVERAGE_COL_NAME: &str = "coverage";
}
