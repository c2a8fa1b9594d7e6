//! Core data types for symbol mapping.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Canonical NSE ticker without exchange prefix
//! - [`IndustryRow`] - One row of the symbol → industry source
//! - [`ResultsRow`] - One row of the results calendar source
//! - [`FundamentalsRecord`] - A results calendar row prepared for display

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exchange token used by the charting tool for every symbol this crate handles.
pub const EXCHANGE_PREFIX: &str = "NSE";

/// A canonical trading symbol.
///
/// Symbols are trimmed, uppercased and stripped of leading `NSE:` prefixes on
/// creation, so `"nse:Reliance"` and `"RELIANCE"` compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, canonicalising it.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        let upper = s.into().trim().to_uppercase();
        let mut stripped = upper.as_str();
        while let Some(rest) = stripped
            .strip_prefix(EXCHANGE_PREFIX)
            .and_then(|rest| rest.strip_prefix(':'))
        {
            stripped = rest.trim();
        }
        Self(stripped.to_string())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if nothing is left after canonicalisation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the symbol with an exchange token, e.g. `NSE:TCS`.
    #[must_use]
    pub fn with_exchange(&self, exchange: &str) -> String {
        format!("{exchange}:{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the symbol → industry source (`Stock Name`, `Basic Industry`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryRow {
    /// Symbol key as it appears in the source.
    pub symbol: String,
    /// Industry label; must be present in the catalog.
    pub industry: String,
}

impl IndustryRow {
    /// Creates a new mapping row.
    #[must_use]
    pub fn new(symbol: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            industry: industry.into(),
        }
    }
}

/// One row of the quarterly results calendar.
///
/// `results_date` is kept as source text (`DD/MM/YYYY`); metrics are percentage
/// changes and are `None` when the source cell is blank or not numeric.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsRow {
    /// Symbol key as it appears in the source.
    pub symbol: String,
    /// Quarterly results date, source text.
    pub results_date: String,
    /// Quarter-on-quarter net profit change, percent.
    pub qoq_net_profit: Option<f64>,
    /// Quarter-on-quarter EPS change, percent.
    pub qoq_eps: Option<f64>,
    /// Year-on-year EPS change, percent.
    pub yoy_eps: Option<f64>,
    /// Quarter-on-quarter sales change, percent.
    pub qoq_sales: Option<f64>,
    /// Year-on-year sales change, percent.
    pub yoy_sales: Option<f64>,
}

impl ResultsRow {
    /// Creates a results row with no metrics.
    #[must_use]
    pub fn new(symbol: impl Into<String>, results_date: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            results_date: results_date.into(),
            ..Default::default()
        }
    }

    /// Sets the four headline metrics (net profit QoQ, EPS QoQ, EPS YoY, sales QoQ).
    #[must_use]
    pub const fn with_metrics(
        mut self,
        qoq_net_profit: f64,
        qoq_eps: f64,
        yoy_eps: f64,
        qoq_sales: f64,
    ) -> Self {
        self.qoq_net_profit = Some(qoq_net_profit);
        self.qoq_eps = Some(qoq_eps);
        self.yoy_eps = Some(yoy_eps);
        self.qoq_sales = Some(qoq_sales);
        self
    }

    /// Sets the year-on-year sales change.
    #[must_use]
    pub const fn with_yoy_sales(mut self, yoy_sales: f64) -> Self {
        self.yoy_sales = Some(yoy_sales);
        self
    }
}

/// A results calendar row relabelled for display.
///
/// Serializes with the display column names used by the fundamentals export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsRecord {
    /// Canonical symbol.
    #[serde(rename = "Symbol")]
    pub symbol: Symbol,
    /// Results date, `DD Mon YYYY` when the whole column parsed, source text otherwise.
    #[serde(rename = "Results Date")]
    pub results_date: String,
    /// Quarter-on-quarter net profit change, percent.
    #[serde(rename = "QoQ Net Profit %")]
    pub qoq_net_profit: Option<f64>,
    /// Quarter-on-quarter EPS change, percent.
    #[serde(rename = "QoQ EPS %")]
    pub qoq_eps: Option<f64>,
    /// Year-on-year EPS change, percent.
    #[serde(rename = "YoY EPS %")]
    pub yoy_eps: Option<f64>,
    /// Quarter-on-quarter sales change, percent.
    #[serde(rename = "QoQ Sales %")]
    pub qoq_sales: Option<f64>,
    /// Year-on-year sales change, percent.
    #[serde(rename = "YoY Sales %")]
    pub yoy_sales: Option<f64>,
}
