#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/indmap/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and logic for NSE symbol industry mapping.
//!
//! Request flow:
//!
//! - [`normalize`](normalize::normalize) - raw text to canonical [`Symbol`]s
//! - [`resolve`](mapping::resolve) / [`map_symbols`](mapping::map_symbols) - split into matched and unmatched
//! - [`format_grouped`](format::format_grouped) / [`format_flat`](format::format_flat) - watchlist text
//! - [`fundamentals`](fundamentals::fundamentals) - results calendar join
//! - [`stats`](stats::stats) - dataset summary
//!
//! All of them read a [`ReferenceDataset`] built once from a [`ReferenceSource`].

/// Request-handling configuration.
pub mod config;
/// Reference tables and their loader.
pub mod dataset;
/// Error types for mapping operations.
pub mod error;
/// Delimited-text exports.
pub mod export;
/// Watchlist formatters.
pub mod format;
/// Results calendar join.
pub mod fundamentals;
/// Symbol resolution.
pub mod mapping;
/// Free-text symbol normalization.
pub mod normalize;
/// Reference data source trait.
pub mod source;
/// Dataset statistics.
pub mod stats;
/// Core data types (Symbol, rows, records).
pub mod types;

// Re-export commonly used items at crate root
pub use config::{DEFAULT_MAX_BATCH_SIZE, MapperConfig};
pub use dataset::{IndustryCatalog, ReferenceDataset, ResultsCalendar, SymbolIndustryTable};
pub use error::{MapperError, Result};
pub use export::export_mapping_csv;
pub use format::{format_flat, format_grouped};
pub use fundamentals::{FundamentalsTable, fundamentals};
pub use mapping::{MappingResult, MatchedSymbol, map_symbols, resolve};
pub use normalize::normalize;
pub use source::ReferenceSource;
pub use stats::{Stats, stats};
pub use types::{EXCHANGE_PREFIX, FundamentalsRecord, IndustryRow, ResultsRow, Symbol};
