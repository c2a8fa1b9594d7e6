//! Service object tying the reference dataset to the request operations.

use std::sync::Arc;

use tracing::{debug, info};

use indmap_core::{
    FundamentalsTable, MapperConfig, MappingResult, ReferenceDataset, ReferenceSource, Result,
    Stats, Symbol, format_flat, format_grouped, fundamentals, map_symbols, stats,
};

/// Loaded, validated reference data plus request settings.
///
/// Construct once at startup with [`IndustryMapper::load`]; every method after
/// that is a read-only query. Cloning is cheap and clones share the dataset, so
/// a mapper can be handed to any number of concurrent request handlers.
///
/// # Example
///
/// ```rust,ignore
/// use indmap::{CsvSource, IndustryMapper};
///
/// let mapper = IndustryMapper::load(&CsvSource::from_dir("attached_assets")).await?;
/// let result = mapper.map_symbols("NSE:TCS, infy\nHDFCBANK")?;
///
/// println!("{}", mapper.format_grouped(&result));
/// for symbol in result.unmatched() {
///     eprintln!("unmapped: {symbol}");
/// }
/// ```
#[derive(Clone, Debug)]
pub struct IndustryMapper {
    dataset: Arc<ReferenceDataset>,
    config: MapperConfig,
}

impl IndustryMapper {
    /// Loads the reference dataset from `source` with default settings.
    ///
    /// # Errors
    ///
    /// Returns a load error if the dataset cannot be read or fails validation;
    /// no mapper exists in that case.
    pub async fn load(source: &dyn ReferenceSource) -> Result<Self> {
        let dataset = ReferenceDataset::load(source).await?;
        let mapper = Self::from_dataset(dataset);
        info!("{}", mapper.stats().summary());
        Ok(mapper)
    }

    /// Wraps an already-built dataset.
    #[must_use]
    pub fn from_dataset(dataset: ReferenceDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            config: MapperConfig::default(),
        }
    }

    /// Replaces the request settings.
    #[must_use]
    pub const fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the request settings.
    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Returns the shared reference dataset.
    #[must_use]
    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    /// Normalizes raw input and resolves it against the symbol table.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the input is empty or exceeds the batch
    /// cap; the request is rejected as a whole.
    pub fn map_symbols(&self, raw: &str) -> Result<MappingResult> {
        map_symbols(raw, self.dataset.table(), &self.config)
    }

    /// Grouped watchlist text for a mapping result.
    #[must_use]
    pub fn format_grouped(&self, result: &MappingResult) -> String {
        format_grouped(result.matched())
    }

    /// Flat watchlist text for a mapping result.
    #[must_use]
    pub fn format_flat(&self, result: &MappingResult) -> String {
        format_flat(result.matched())
    }

    /// Results calendar rows for the given symbols.
    #[must_use]
    pub fn fundamentals_for(&self, symbols: &[Symbol]) -> FundamentalsTable {
        let table = fundamentals(symbols, self.dataset.calendar());
        debug!(
            requested = symbols.len(),
            found = table.len(),
            "Fundamentals lookup"
        );
        table
    }

    /// Dataset summary counts.
    #[must_use]
    pub fn stats(&self) -> Stats {
        stats(self.dataset.table(), self.dataset.catalog())
    }

    /// All valid industry labels, sorted.
    #[must_use]
    pub fn available_industries(&self) -> &[String] {
        self.dataset.catalog().as_slice()
    }
}
