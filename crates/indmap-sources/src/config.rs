//! Locations of the reference data files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory searched when none is configured.
pub const DEFAULT_DATA_DIR: &str = "attached_assets";
/// Header-less, single-column list of industry labels.
pub const DEFAULT_CATALOG_FILE: &str = "Industry Analytics.csv";
/// Symbol → industry table with `Stock Name` and `Basic Industry` columns.
pub const DEFAULT_MAPPING_FILE: &str = "Basic RS Setup.csv";
/// Quarterly results calendar.
pub const DEFAULT_CALENDAR_FILE: &str = "Results Calendar.csv";

/// Where the three reference files live.
///
/// File names are resolved against `data_dir` unless they are absolute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding the data files.
    pub data_dir: PathBuf,
    /// Industry catalog file.
    pub catalog_file: PathBuf,
    /// Symbol → industry mapping file.
    pub mapping_file: PathBuf,
    /// Results calendar file.
    pub calendar_file: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            mapping_file: PathBuf::from(DEFAULT_MAPPING_FILE),
            calendar_file: PathBuf::from(DEFAULT_CALENDAR_FILE),
        }
    }
}

impl DatasetConfig {
    /// Creates a configuration with default file names inside `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the industry catalog file.
    #[must_use]
    pub fn with_catalog_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_file = path.into();
        self
    }

    /// Sets the symbol mapping file.
    #[must_use]
    pub fn with_mapping_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_file = path.into();
        self
    }

    /// Sets the results calendar file.
    #[must_use]
    pub fn with_calendar_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.calendar_file = path.into();
        self
    }

    /// Full path of the industry catalog.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.resolve(&self.catalog_file)
    }

    /// Full path of the symbol mapping.
    #[must_use]
    pub fn mapping_path(&self) -> PathBuf {
        self.resolve(&self.mapping_file)
    }

    /// Full path of the results calendar.
    #[must_use]
    pub fn calendar_path(&self) -> PathBuf {
        self.resolve(&self.calendar_file)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        self.data_dir.join(file)
    }
}
