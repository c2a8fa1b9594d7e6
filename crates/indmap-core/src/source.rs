//! Source trait for reference data.
//!
//! A [`ReferenceSource`] hands the dataset loader already-parsed rows. Parsing
//! and storage format are the implementation's concern; validation and table
//! construction happen in [`ReferenceDataset::load`](crate::dataset::ReferenceDataset::load).

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{IndustryRow, ResultsRow},
};

/// Supplier of the three reference tables.
///
/// Implementations must return complete tables or an error; partial results
/// are never accepted by the loader.
#[async_trait]
pub trait ReferenceSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "CSV files").
    fn name(&self) -> &str;

    /// Fetches the list of valid industry labels.
    ///
    /// Order and duplicates do not matter; the loader sorts and deduplicates.
    async fn industry_catalog(&self) -> Result<Vec<String>>;

    /// Fetches the symbol → industry rows.
    async fn symbol_industries(&self) -> Result<Vec<IndustryRow>>;

    /// Fetches the quarterly results calendar rows.
    async fn results_calendar(&self) -> Result<Vec<ResultsRow>>;
}
