//! Immutable reference tables.
//!
//! [`ReferenceDataset`] bundles the three tables every query reads:
//!
//! - [`SymbolIndustryTable`] - canonical symbol → industry label
//! - [`IndustryCatalog`] - sorted set of legal industry labels
//! - [`ResultsCalendar`] - quarterly results dates and growth metrics
//!
//! A dataset is either fully built and validated or not built at all. Once
//! returned by [`ReferenceDataset::load`] or [`ReferenceDataset::from_rows`] it
//! is never mutated and can be shared freely behind an `Arc`.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, instrument, warn};

use crate::{
    error::{MapperError, Result},
    source::ReferenceSource,
    types::{IndustryRow, ResultsRow, Symbol},
};

/// Sorted set of valid industry labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndustryCatalog {
    industries: Vec<String>,
}

impl IndustryCatalog {
    /// Builds a catalog from raw labels; blanks are dropped, the rest trimmed,
    /// sorted and deduplicated.
    #[must_use]
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let industries: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();
        Self {
            industries: industries.into_iter().collect(),
        }
    }

    /// Returns true if `industry` is a legal label.
    #[must_use]
    pub fn contains(&self, industry: &str) -> bool {
        self.industries
            .binary_search_by(|probe| probe.as_str().cmp(industry))
            .is_ok()
    }

    /// Returns the labels in display (sorted) order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.industries
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.industries.len()
    }

    /// Returns true if the catalog holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
    }

    /// Returns an iterator over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.industries.iter().map(String::as_str)
    }
}

/// Lookup table from canonical symbol to industry label.
///
/// Every label in the table is a member of the catalog it was validated against.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndustryTable {
    entries: HashMap<Symbol, String>,
    referenced: BTreeSet<String>,
    rows: usize,
}

impl SymbolIndustryTable {
    /// Builds the table from source rows, rejecting any label outside `catalog`.
    ///
    /// Symbols are canonicalised; when a symbol repeats, the last row wins.
    /// Rows with a blank symbol are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::UnknownIndustries`] listing every label that is not
    /// in `catalog`.
    pub fn new(rows: Vec<IndustryRow>, catalog: &IndustryCatalog) -> Result<Self> {
        let total = rows.len();
        let unknown: BTreeSet<String> = rows
            .iter()
            .map(|row| row.industry.trim())
            .filter(|industry| !catalog.contains(industry))
            .map(str::to_string)
            .collect();

        if !unknown.is_empty() {
            return Err(MapperError::UnknownIndustries {
                labels: unknown.into_iter().collect(),
            });
        }

        let mut entries = HashMap::with_capacity(total);
        let mut referenced = BTreeSet::new();
        for row in rows {
            let industry = row.industry.trim().to_string();
            referenced.insert(industry.clone());

            let symbol = Symbol::new(row.symbol);
            if symbol.is_empty() {
                debug!(industry = %industry, "Skipping mapping row with blank symbol");
                continue;
            }
            entries.insert(symbol, industry);
        }

        Ok(Self {
            entries,
            referenced,
            rows: total,
        })
    }

    /// Returns the industry for a symbol, if mapped.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&str> {
        self.entries.get(symbol).map(String::as_str)
    }

    /// Returns true if the symbol is mapped.
    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Returns the number of distinct mapped symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no symbol is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of rows the table was built from.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns the distinct industry labels referenced by the source rows.
    pub fn referenced_industries(&self) -> impl Iterator<Item = &str> {
        self.referenced.iter().map(String::as_str)
    }
}

/// Quarterly results calendar, in source order.
///
/// Coverage is not required to match the symbol table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultsCalendar {
    rows: Vec<ResultsRow>,
}

impl ResultsCalendar {
    /// Wraps calendar rows.
    #[must_use]
    pub const fn new(rows: Vec<ResultsRow>) -> Self {
        Self { rows }
    }

    /// Returns the rows in source order.
    #[must_use]
    pub fn rows(&self) -> &[ResultsRow] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the calendar is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The validated, read-only reference data shared by all requests.
#[derive(Clone, Debug)]
pub struct ReferenceDataset {
    table: SymbolIndustryTable,
    catalog: IndustryCatalog,
    calendar: ResultsCalendar,
}

impl ReferenceDataset {
    /// Loads and validates all tables from `source`.
    ///
    /// The catalog and mapping are fetched concurrently and must both succeed.
    /// A results calendar that cannot be fetched is logged and replaced by an
    /// empty one; fundamentals are optional for the rest of the tool.
    ///
    /// # Errors
    ///
    /// Returns a load error if the catalog or mapping cannot be read, or if the
    /// mapping references a label outside the catalog.
    #[instrument(skip(source), fields(source = source.name()))]
    pub async fn load(source: &dyn ReferenceSource) -> Result<Self> {
        let (catalog, rows) =
            futures::try_join!(source.industry_catalog(), source.symbol_industries())?;

        let calendar = match source.results_calendar().await {
            Ok(calendar) => calendar,
            Err(e) => {
                warn!(error = %e, "Results calendar unavailable, fundamentals disabled");
                Vec::new()
            }
        };

        let dataset = Self::from_rows(catalog, rows, calendar)?;
        info!(
            symbols = dataset.table.row_count(),
            industries = dataset.catalog.len(),
            calendar_rows = dataset.calendar.len(),
            "Reference dataset loaded"
        );
        Ok(dataset)
    }

    /// Builds a dataset from already-fetched rows.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::UnknownIndustries`] if a mapping row references a
    /// label outside the catalog.
    pub fn from_rows<S: AsRef<str>>(
        catalog: Vec<S>,
        rows: Vec<IndustryRow>,
        calendar: Vec<ResultsRow>,
    ) -> Result<Self> {
        let catalog = IndustryCatalog::new(catalog);
        let table = SymbolIndustryTable::new(rows, &catalog)?;
        Ok(Self {
            table,
            catalog,
            calendar: ResultsCalendar::new(calendar),
        })
    }

    /// Returns the symbol → industry table.
    #[must_use]
    pub const fn table(&self) -> &SymbolIndustryTable {
        &self.table
    }

    /// Returns the industry catalog.
    #[must_use]
    pub const fn catalog(&self) -> &IndustryCatalog {
        &self.catalog
    }

    /// Returns the results calendar.
    #[must_use]
    pub const fn calendar(&self) -> &ResultsCalendar {
        &self.calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn catalog() -> Vec<&'static str> {
        vec!["IT - Software", "Private Sector Bank", "Refineries & Marketing"]
    }

    fn rows() -> Vec<IndustryRow> {
        vec![
            IndustryRow::new("TCS", "IT - Software"),
            IndustryRow::new("infy", "IT - Software"),
            IndustryRow::new("HDFCBANK", "Private Sector Bank"),
        ]
    }

    #[test]
    fn test_catalog_sorted_and_deduplicated() {
        let catalog = IndustryCatalog::new(["Zinc", " Aluminium ", "Zinc", ""]);
        assert_eq!(catalog.as_slice(), &["Aluminium", "Zinc"]);
        assert!(catalog.contains("Zinc"));
        assert!(!catalog.contains("Copper"));
    }

    #[test]
    fn test_table_canonicalises_symbols() {
        let dataset = ReferenceDataset::from_rows(catalog(), rows(), Vec::new()).unwrap();
        assert_eq!(
            dataset.table().get(&Symbol::new("INFY")),
            Some("IT - Software")
        );
        assert_eq!(dataset.table().len(), 3);
        assert_eq!(dataset.catalog().len(), 3);
    }

    #[test]
    fn test_unknown_industry_rejected() {
        let mut rows = rows();
        rows.push(IndustryRow::new("XYZ", "Space Tourism"));
        rows.push(IndustryRow::new("ABC", "Airlines"));

        let err = ReferenceDataset::from_rows(catalog(), rows, Vec::new()).unwrap_err();
        assert!(err.is_load_error());
        match err {
            MapperError::UnknownIndustries { labels } => {
                assert_eq!(labels, vec!["Airlines", "Space Tourism"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_symbol_last_row_wins() {
        let rows = vec![
            IndustryRow::new("TCS", "IT - Software"),
            IndustryRow::new("TCS", "Private Sector Bank"),
        ];
        let table = SymbolIndustryTable::new(rows, &IndustryCatalog::new(catalog())).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(&Symbol::new("TCS")), Some("Private Sector Bank"));
        assert_eq!(table.referenced_industries().count(), 2);
    }

    #[derive(Debug)]
    struct FixtureSource {
        calendar_fails: bool,
    }

    #[async_trait]
    impl ReferenceSource for FixtureSource {
        fn name(&self) -> &str {
            "fixture"
        }

        async fn industry_catalog(&self) -> Result<Vec<String>> {
            Ok(catalog().into_iter().map(String::from).collect())
        }

        async fn symbol_industries(&self) -> Result<Vec<IndustryRow>> {
            Ok(rows())
        }

        async fn results_calendar(&self) -> Result<Vec<ResultsRow>> {
            if self.calendar_fails {
                Err(MapperError::source_error("calendar", "file not found"))
            } else {
                Ok(vec![ResultsRow::new("TCS", "09/01/2025")])
            }
        }
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = FixtureSource {
            calendar_fails: false,
        };
        let dataset = ReferenceDataset::load(&source).await.unwrap();
        assert_eq!(dataset.table().len(), 3);
        assert_eq!(dataset.calendar().len(), 1);
    }

    #[tokio::test]
    async fn test_load_tolerates_missing_calendar() {
        let source = FixtureSource {
            calendar_fails: true,
        };
        let dataset = ReferenceDataset::load(&source).await.unwrap();
        assert!(dataset.calendar().is_empty());
        assert_eq!(dataset.table().len(), 3);
    }
}
