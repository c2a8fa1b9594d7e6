#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/indmap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Unified interface for NSE symbol industry mapping.
//!
//! This crate re-exports the core types and the reference sources, and provides
//! [`IndustryMapper`], the service object that owns the loaded dataset.
//!
//! # Features
//!
//! - `files` - CSV file source (default)
//!
//! # Example
//!
//! ```rust,ignore
//! use indmap::{CsvSource, DatasetConfig, IndustryMapper};
//!
//! #[tokio::main]
//! async fn main() -> indmap::Result<()> {
//!     let source = CsvSource::new(DatasetConfig::new("attached_assets"));
//!     let mapper = IndustryMapper::load(&source).await?;
//!
//!     let result = mapper.map_symbols("RELIANCE, NSE:HDFCBANK, tcs")?;
//!     println!("{}", mapper.format_grouped(&result));
//!     println!("{}", result.to_frame()?);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use indmap_core::*;

// Sources
#[cfg(feature = "files")]
pub use indmap_sources::CsvSource;
pub use indmap_sources::{DEFAULT_DATA_DIR, DatasetConfig, InMemorySource};

// Frames returned by `to_frame`
pub use polars::prelude::DataFrame;

mod mapper;
pub use mapper::IndustryMapper;
