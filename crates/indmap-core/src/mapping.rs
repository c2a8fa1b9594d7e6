//! Mapping engine: resolves canonical symbols against the industry table.

use std::collections::HashMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::MapperConfig,
    dataset::SymbolIndustryTable,
    error::{MapperError, Result},
    normalize::normalize,
    types::Symbol,
};

/// A symbol found in the industry table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchedSymbol {
    /// Canonical symbol.
    #[serde(rename = "Symbol")]
    pub symbol: Symbol,
    /// Industry label from the table.
    #[serde(rename = "Industry")]
    pub industry: String,
}

impl MatchedSymbol {
    /// Creates a matched entry.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, industry: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            industry: industry.into(),
        }
    }
}

/// Outcome of resolving a request.
///
/// `matched` and `unmatched` partition the normalized input; both keep input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingResult {
    matched: Vec<MatchedSymbol>,
    unmatched: Vec<Symbol>,
}

impl MappingResult {
    /// Returns matched symbols in input order.
    #[must_use]
    pub fn matched(&self) -> &[MatchedSymbol] {
        &self.matched
    }

    /// Returns symbols absent from the table, in input order.
    #[must_use]
    pub fn unmatched(&self) -> &[Symbol] {
        &self.unmatched
    }

    /// Returns the industry a symbol resolved to.
    #[must_use]
    pub fn industry_of(&self, symbol: &Symbol) -> Option<&str> {
        self.matched
            .iter()
            .find(|m| &m.symbol == symbol)
            .map(|m| m.industry.as_str())
    }

    /// Returns the matched symbols in input order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.matched.iter().map(|m| &m.symbol)
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Returns matched rows ordered by how many symbols share their industry,
    /// largest group first. Rows with equal group size keep input order.
    #[must_use]
    pub fn sorted_by_industry_frequency(&self) -> Vec<MatchedSymbol> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for m in &self.matched {
            *counts.entry(m.industry.as_str()).or_insert(0) += 1;
        }

        let mut rows = self.matched.clone();
        rows.sort_by_key(|m| std::cmp::Reverse(counts.get(m.industry.as_str()).copied()));
        rows
    }

    /// Builds a two-column (`Symbol`, `Industry`) DataFrame in frequency order.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::Frame`] if polars rejects the columns.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let rows = self.sorted_by_industry_frequency();
        let symbols: Vec<&str> = rows.iter().map(|m| m.symbol.as_str()).collect();
        let industries: Vec<&str> = rows.iter().map(|m| m.industry.as_str()).collect();

        DataFrame::new(vec![
            Column::new("Symbol".into(), symbols),
            Column::new("Industry".into(), industries),
        ])
        .map_err(|e| MapperError::Frame(e.to_string()))
    }
}

/// Splits `symbols` into matched and unmatched, preserving input order.
#[must_use]
pub fn resolve(symbols: &[Symbol], table: &SymbolIndustryTable) -> MappingResult {
    let mut result = MappingResult::default();
    for symbol in symbols {
        match table.get(symbol) {
            Some(industry) => result.matched.push(MatchedSymbol {
                symbol: symbol.clone(),
                industry: industry.to_string(),
            }),
            None => result.unmatched.push(symbol.clone()),
        }
    }
    result
}

/// Normalizes raw input, enforces the batch cap and resolves it.
///
/// # Errors
///
/// Returns [`MapperError::Validation`] if the input holds more than
/// `config.max_batch_size` distinct symbols. Nothing is resolved in that case.
/// Input that normalizes to no symbols yields an empty result.
pub fn map_symbols(
    raw: &str,
    table: &SymbolIndustryTable,
    config: &MapperConfig,
) -> Result<MappingResult> {
    let symbols = normalize(raw);

    if symbols.len() > config.max_batch_size {
        return Err(MapperError::Validation(format!(
            "Maximum {} symbols allowed per batch",
            config.max_batch_size
        )));
    }

    let result = resolve(&symbols, table);
    debug!(
        symbols = symbols.len(),
        matched = result.matched.len(),
        unmatched = result.unmatched.len(),
        "Resolved symbols"
    );
    Ok(result)
}
