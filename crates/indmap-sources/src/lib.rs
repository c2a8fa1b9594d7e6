#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/indmap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Reference data sources for NSE symbol industry mapping.
//!
//! This crate provides implementations of the [`ReferenceSource`] trait from `indmap-core`:
//!
//! - [`CsvSource`] - CSV files on disk (default, requires `files` feature)
//! - [`InMemorySource`] - rows supplied in code

/// Data file locations.
pub mod config;
/// In-memory source implementation.
pub mod memory;

/// CSV file source implementation.
#[cfg(feature = "files")]
pub mod files;

// Re-export the trait for convenience
pub use indmap_core::ReferenceSource;

// Re-export implementations
pub use config::{DEFAULT_DATA_DIR, DatasetConfig};
pub use memory::InMemorySource;

#[cfg(feature = "files")]
pub use files::CsvSource;
