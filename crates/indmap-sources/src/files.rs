//! CSV file reference source.

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord, Trim};
use indmap_core::{IndustryRow, MapperError, ReferenceSource, Result, ResultsRow};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::config::DatasetConfig;

/// Mapping file column holding the symbol.
const SYMBOL_COLUMN: &str = "Stock Name";
/// Mapping file column holding the industry label.
const INDUSTRY_COLUMN: &str = "Basic Industry";

/// Reads the reference tables from CSV files.
///
/// Files are read on the blocking thread pool each time a table is requested;
/// callers are expected to load once and keep the resulting dataset.
#[derive(Clone, Debug)]
pub struct CsvSource {
    config: DatasetConfig,
}

impl CsvSource {
    /// Creates a source for the given file locations.
    #[must_use]
    pub const fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// Creates a source using default file names inside `data_dir`.
    #[must_use]
    pub fn from_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(DatasetConfig::new(data_dir))
    }

    /// Returns the file locations.
    #[must_use]
    pub const fn config(&self) -> &DatasetConfig {
        &self.config
    }
}

#[async_trait]
impl ReferenceSource for CsvSource {
    fn name(&self) -> &str {
        "CSV files"
    }

    #[instrument(skip(self))]
    async fn industry_catalog(&self) -> Result<Vec<String>> {
        let path = self.config.catalog_path();
        blocking(move || read_catalog(&path)).await
    }

    #[instrument(skip(self))]
    async fn symbol_industries(&self) -> Result<Vec<IndustryRow>> {
        let path = self.config.mapping_path();
        blocking(move || read_mapping(&path)).await
    }

    #[instrument(skip(self))]
    async fn results_calendar(&self) -> Result<Vec<ResultsRow>> {
        let path = self.config.calendar_path();
        blocking(move || read_calendar(&path)).await
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| MapperError::Load(e.to_string()))?
}

fn open(path: &Path, has_headers: bool) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| source_error(path, e))?;
    Ok(ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file))
}

fn source_error(path: &Path, e: impl ToString) -> MapperError {
    MapperError::source_error(path.display().to_string(), e)
}

/// First column of every non-blank record; the file has no header.
fn read_catalog(path: &Path) -> Result<Vec<String>> {
    let mut reader = open(path, false)?;
    let mut labels = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| source_error(path, e))?;
        if let Some(label) = record.get(0).filter(|label| !label.is_empty()) {
            labels.push(label.to_string());
        }
    }
    debug!(count = labels.len(), "Read industry catalog");
    Ok(labels)
}

fn read_mapping(path: &Path) -> Result<Vec<IndustryRow>> {
    let mut reader = open(path, true)?;
    let headers = reader.headers().map_err(|e| source_error(path, e))?.clone();
    let symbol_idx = column_index(&headers, SYMBOL_COLUMN, path)?;
    let industry_idx = column_index(&headers, INDUSTRY_COLUMN, path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| source_error(path, e))?;
        let symbol = record.get(symbol_idx).unwrap_or_default();
        let industry = record.get(industry_idx).unwrap_or_default();
        if symbol.is_empty() && industry.is_empty() {
            continue;
        }
        rows.push(IndustryRow::new(symbol, industry));
    }
    debug!(count = rows.len(), "Read symbol mapping");
    Ok(rows)
}

fn column_index(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| source_error(path, format!("missing column '{name}'")))
}

/// Results calendar record as laid out in the source file.
#[derive(Debug, Deserialize)]
struct CalendarRecord {
    #[serde(rename = "Stock Name")]
    symbol: String,
    #[serde(rename = "Quarterly Results Date", default)]
    results_date: String,
    #[serde(
        rename = "QoQ % Net Profit Latest",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    qoq_net_profit: Option<f64>,
    #[serde(
        rename = "QoQ % EPS Latest",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    qoq_eps: Option<f64>,
    #[serde(
        rename = "YoY% EPS Latest",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    yoy_eps: Option<f64>,
    #[serde(
        rename = "QoQ % Sales Latest",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    qoq_sales: Option<f64>,
    #[serde(
        rename = "YoY % Sales Latest",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    yoy_sales: Option<f64>,
}

impl From<CalendarRecord> for ResultsRow {
    fn from(record: CalendarRecord) -> Self {
        Self {
            symbol: record.symbol,
            results_date: record.results_date,
            qoq_net_profit: record.qoq_net_profit,
            qoq_eps: record.qoq_eps,
            yoy_eps: record.yoy_eps,
            qoq_sales: record.qoq_sales,
            yoy_sales: record.yoy_sales,
        }
    }
}

fn read_calendar(path: &Path) -> Result<Vec<ResultsRow>> {
    let mut reader = open(path, true)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<CalendarRecord>() {
        let record = record.map_err(|e| source_error(path, e))?;
        if record.symbol.is_empty() {
            continue;
        }
        rows.push(record.into());
    }
    debug!(count = rows.len(), "Read results calendar");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join("Industry Analytics.csv"),
            "IT - Software\nPrivate Sector Bank\n\nCement & Cement Products\n",
        )
        .unwrap();
        fs::write(
            dir.join("Basic RS Setup.csv"),
            "Sr,Stock Name,Basic Industry,RS\n\
             1,TCS,IT - Software,88\n\
             2, infy ,IT - Software,75\n\
             3,HDFCBANK,Private Sector Bank,61\n",
        )
        .unwrap();
        fs::write(
            dir.join("Results Calendar.csv"),
            "Stock Name,Quarterly Results Date,QoQ % Net Profit Latest,QoQ % EPS Latest,YoY% EPS Latest,QoQ % Sales Latest,YoY % Sales Latest\n\
             TCS,09/01/2025,5.5,5.1,12,3.2,5.6\n\
             INFY,16/01/2025,n/a,,,-1.5,\n",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_reads_all_tables() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path());
        let source = CsvSource::from_dir(dir.path());

        let catalog = source.industry_catalog().await.unwrap();
        assert_eq!(
            catalog,
            vec!["IT - Software", "Private Sector Bank", "Cement & Cement Products"]
        );

        let mapping = source.symbol_industries().await.unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[1], IndustryRow::new("infy", "IT - Software"));

        let calendar = source.results_calendar().await.unwrap();
        assert_eq!(calendar.len(), 2);
        assert_eq!(calendar[0].yoy_eps, Some(12.0));
        assert_eq!(calendar[1].qoq_net_profit, None);
        assert_eq!(calendar[1].qoq_sales, Some(-1.5));
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let dir = TempDir::new().unwrap();
        let source = CsvSource::from_dir(dir.path());
        let err = source.industry_catalog().await.unwrap_err();
        assert!(err.is_load_error());
        assert!(err.to_string().contains("Industry Analytics.csv"));
    }

    #[tokio::test]
    async fn test_missing_column() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Basic RS Setup.csv"), "Symbol,Sector\nTCS,IT\n").unwrap();
        let source = CsvSource::from_dir(dir.path());
        let err = source.symbol_industries().await.unwrap_err();
        assert!(err.to_string().contains("missing column 'Stock Name'"));
    }
}
