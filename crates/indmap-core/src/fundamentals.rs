//! Joins symbols against the quarterly results calendar.

use std::collections::HashSet;

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, warn};

use crate::{
    dataset::ResultsCalendar,
    error::{MapperError, Result},
    export::write_delimited,
    types::{FundamentalsRecord, ResultsRow, Symbol},
};

/// Date format used by the results calendar source.
const SOURCE_DATE_FORMAT: &str = "%d/%m/%Y";
/// Date format shown to users.
const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Display headers, in column order.
pub const FUNDAMENTALS_HEADERS: [&str; 7] = [
    "Symbol",
    "Results Date",
    "QoQ Net Profit %",
    "QoQ EPS %",
    "YoY EPS %",
    "QoQ Sales %",
    "YoY Sales %",
];

/// Calendar rows matching a request, relabelled for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FundamentalsTable {
    records: Vec<FundamentalsRecord>,
}

impl FundamentalsTable {
    /// Returns the records in calendar order.
    #[must_use]
    pub fn records(&self) -> &[FundamentalsRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no calendar row matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Renders the table as comma-delimited text with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::Export`] if a record cannot be serialized.
    pub fn to_csv(&self) -> Result<String> {
        write_delimited(&FUNDAMENTALS_HEADERS, &self.records)
    }

    /// Builds a DataFrame with the display column names.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::Frame`] if polars rejects the columns.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let metric = |f: fn(&FundamentalsRecord) -> Option<f64>| -> Vec<Option<f64>> {
            self.records.iter().map(f).collect()
        };
        let [symbol, date, net_profit, qoq_eps, yoy_eps, qoq_sales, yoy_sales] =
            FUNDAMENTALS_HEADERS;

        DataFrame::new(vec![
            Column::new(
                symbol.into(),
                self.records
                    .iter()
                    .map(|r| r.symbol.as_str())
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                date.into(),
                self.records
                    .iter()
                    .map(|r| r.results_date.as_str())
                    .collect::<Vec<_>>(),
            ),
            Column::new(net_profit.into(), metric(|r| r.qoq_net_profit)),
            Column::new(qoq_eps.into(), metric(|r| r.qoq_eps)),
            Column::new(yoy_eps.into(), metric(|r| r.yoy_eps)),
            Column::new(qoq_sales.into(), metric(|r| r.qoq_sales)),
            Column::new(yoy_sales.into(), metric(|r| r.yoy_sales)),
        ])
        .map_err(|e| MapperError::Frame(e.to_string()))
    }
}

/// Returns the calendar rows for `symbols`, relabelled for display.
///
/// Keys on both sides are re-canonicalised before comparison. Symbols without
/// a calendar row are simply absent; an empty table is a normal outcome.
///
/// Results dates are reformatted from `DD/MM/YYYY` to `DD Mon YYYY` only if
/// every non-blank date in the result parses. Otherwise the column keeps its
/// source text unchanged.
#[must_use]
pub fn fundamentals(symbols: &[Symbol], calendar: &ResultsCalendar) -> FundamentalsTable {
    let wanted: HashSet<Symbol> = symbols
        .iter()
        .map(|symbol| Symbol::new(symbol.as_str()))
        .collect();

    let mut records: Vec<FundamentalsRecord> = calendar
        .rows()
        .iter()
        .filter_map(|row| {
            let symbol = Symbol::new(row.symbol.as_str());
            wanted.contains(&symbol).then(|| relabel(symbol, row))
        })
        .collect();

    if records.is_empty() {
        debug!(requested = symbols.len(), "No calendar rows matched");
        return FundamentalsTable::default();
    }

    let dates: Vec<&str> = records.iter().map(|r| r.results_date.as_str()).collect();
    match reformat_dates(&dates) {
        Ok(display) => {
            for (record, date) in records.iter_mut().zip(display) {
                record.results_date = date;
            }
        }
        Err(e) => {
            warn!(error = %e, "Results dates left in source format");
        }
    }

    debug!(
        requested = symbols.len(),
        matched = records.len(),
        "Joined results calendar"
    );
    FundamentalsTable { records }
}

fn relabel(symbol: Symbol, row: &ResultsRow) -> FundamentalsRecord {
    FundamentalsRecord {
        symbol,
        results_date: row.results_date.clone(),
        qoq_net_profit: row.qoq_net_profit,
        qoq_eps: row.qoq_eps,
        yoy_eps: row.yoy_eps,
        qoq_sales: row.qoq_sales,
        yoy_sales: row.yoy_sales,
    }
}

/// Converts every date to display format, or fails on the first unparseable one.
///
/// Blank cells stay blank.
fn reformat_dates(dates: &[&str]) -> std::result::Result<Vec<String>, chrono::ParseError> {
    dates
        .iter()
        .map(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(String::new());
            }
            NaiveDate::parse_from_str(raw, SOURCE_DATE_FORMAT)
                .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> ResultsCalendar {
        ResultsCalendar::new(vec![
            ResultsRow::new("tcs", "09/01/2025").with_metrics(5.5, 5.1, 12.0, 3.2),
            ResultsRow::new("INFY", "16/01/2025"),
            ResultsRow::new("WIPRO", "17/01/2025").with_yoy_sales(-0.7),
        ])
    }

    fn symbols(raw: &[&str]) -> Vec<Symbol> {
        raw.iter().copied().map(Symbol::new).collect()
    }

    #[test]
    fn test_filters_to_requested_symbols() {
        let table = fundamentals(&symbols(&["TCS", "WIPRO", "XYZCO"]), &calendar());
        let found: Vec<&str> = table.records().iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(found, vec!["TCS", "WIPRO"]);
        assert_eq!(table.records()[0].qoq_net_profit, Some(5.5));
        assert_eq!(table.records()[1].yoy_sales, Some(-0.7));
    }

    #[test]
    fn test_reformats_dates() {
        let table = fundamentals(&symbols(&["TCS", "INFY"]), &calendar());
        assert_eq!(table.records()[0].results_date, "09 Jan 2025");
        assert_eq!(table.records()[1].results_date, "16 Jan 2025");
    }

    #[test]
    fn test_bad_date_keeps_whole_column() {
        let calendar = ResultsCalendar::new(vec![
            ResultsRow::new("TCS", "09/01/2025"),
            ResultsRow::new("INFY", "TBA"),
        ]);
        let table = fundamentals(&symbols(&["TCS", "INFY"]), &calendar);
        assert_eq!(table.records()[0].results_date, "09/01/2025");
        assert_eq!(table.records()[1].results_date, "TBA");
    }

    #[test]
    fn test_blank_date_does_not_block_reformat() {
        let calendar = ResultsCalendar::new(vec![
            ResultsRow::new("TCS", "09/01/2025"),
            ResultsRow::new("INFY", ""),
        ]);
        let table = fundamentals(&symbols(&["TCS", "INFY"]), &calendar);
        assert_eq!(table.records()[0].results_date, "09 Jan 2025");
        assert_eq!(table.records()[1].results_date, "");
    }

    #[test]
    fn test_no_match_is_empty() {
        let table = fundamentals(&symbols(&["XYZCO"]), &calendar());
        assert!(table.is_empty());
        assert!(fundamentals(&[], &calendar()).is_empty());
    }

    #[test]
    fn test_csv_export() {
        let table = fundamentals(&symbols(&["TCS", "INFY"]), &calendar());
        let csv = table.to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Symbol,Results Date,QoQ Net Profit %,QoQ EPS %,YoY EPS %,QoQ Sales %,YoY Sales %")
        );
        assert_eq!(lines.next(), Some("TCS,09 Jan 2025,5.5,5.1,12.0,3.2,"));
        assert_eq!(lines.next(), Some("INFY,16 Jan 2025,,,,,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_csv_has_header() {
        let csv = FundamentalsTable::default().to_csv().unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_to_frame() {
        let table = fundamentals(&symbols(&["TCS", "WIPRO"]), &calendar());
        let df = table.to_frame().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), FUNDAMENTALS_HEADERS.len());
        assert!(df.column("Results Date").is_ok());
    }
}
