//! In-memory reference source.

use async_trait::async_trait;
use indmap_core::{IndustryRow, MapperError, ReferenceSource, Result, ResultsRow};

/// Serves reference rows held in memory.
///
/// Useful for tests and for embedding a dataset compiled into a binary. A
/// source built without a calendar reports it as unavailable, which the
/// loader treats as "no fundamentals".
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    catalog: Vec<String>,
    mapping: Vec<IndustryRow>,
    calendar: Option<Vec<ResultsRow>>,
}

impl InMemorySource {
    /// Creates a source from a catalog and mapping rows.
    #[must_use]
    pub fn new<I, S>(catalog: I, mapping: Vec<IndustryRow>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog: catalog.into_iter().map(Into::into).collect(),
            mapping,
            calendar: None,
        }
    }

    /// Sets the results calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: Vec<ResultsRow>) -> Self {
        self.calendar = Some(calendar);
        self
    }
}

#[async_trait]
impl ReferenceSource for InMemorySource {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn industry_catalog(&self) -> Result<Vec<String>> {
        Ok(self.catalog.clone())
    }

    async fn symbol_industries(&self) -> Result<Vec<IndustryRow>> {
        Ok(self.mapping.clone())
    }

    async fn results_calendar(&self) -> Result<Vec<ResultsRow>> {
        self.calendar
            .clone()
            .ok_or_else(|| MapperError::source_error(self.name(), "no results calendar configured"))
    }
}
