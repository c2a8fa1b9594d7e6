//! CLI argument definitions.
//!
//! | Command      | Description                                         |
//! |--------------|-----------------------------------------------------|
//! | `map`        | Map symbols to industries and print a watchlist     |
//! | `stats`      | Print dataset counts                                |
//! | `industries` | List the valid industry categories                  |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use indmap::{DEFAULT_DATA_DIR, DEFAULT_MAX_BATCH_SIZE, DatasetConfig, MapperConfig};

/// Map NSE symbols to industries and build TradingView watchlists.
#[derive(Debug, Parser)]
#[command(name = "indmap", author, version, about)]
pub(crate) struct Cli {
    /// Reference data locations.
    #[command(flatten)]
    pub(crate) data: DataArgs,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Args)]
pub(crate) struct DataArgs {
    /// Directory holding the reference CSV files.
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub(crate) data_dir: PathBuf,

    /// Industry catalog file, relative to the data directory.
    #[arg(long, global = true)]
    pub(crate) catalog: Option<PathBuf>,

    /// Symbol → industry mapping file, relative to the data directory.
    #[arg(long, global = true)]
    pub(crate) mapping: Option<PathBuf>,

    /// Results calendar file, relative to the data directory.
    #[arg(long, global = true)]
    pub(crate) calendar: Option<PathBuf>,

    /// Maximum number of distinct symbols per request.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_BATCH_SIZE)]
    pub(crate) max_batch: usize,
}

impl DataArgs {
    pub(crate) fn dataset_config(&self) -> DatasetConfig {
        let mut config = DatasetConfig::new(&self.data_dir);
        if let Some(path) = &self.catalog {
            config = config.with_catalog_file(path);
        }
        if let Some(path) = &self.mapping {
            config = config.with_mapping_file(path);
        }
        if let Some(path) = &self.calendar {
            config = config.with_calendar_file(path);
        }
        config
    }

    pub(crate) fn mapper_config(&self) -> MapperConfig {
        MapperConfig::new().with_max_batch_size(self.max_batch)
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Map symbols to industries.
    ///
    /// Symbols may be separated by commas, semicolons or newlines, with or
    /// without the NSE: prefix. Reads stdin when no symbols are given.
    Map(MapArgs),
    /// Print dataset counts.
    Stats,
    /// List the valid industry categories.
    Industries,
}

#[derive(Debug, Args)]
pub(crate) struct MapArgs {
    /// Symbols to map, e.g. `RELIANCE NSE:TCS hdfcbank`.
    pub(crate) symbols: Vec<String>,

    /// Print a flat symbol list instead of industry groups.
    #[arg(long, conflicts_with = "json")]
    pub(crate) flat: bool,

    /// Print the mapping result as JSON.
    #[arg(long)]
    pub(crate) json: bool,

    /// Print the Symbol/Industry table.
    #[arg(long)]
    pub(crate) table: bool,

    /// Write the Symbol/Industry export to this file.
    #[arg(long, value_name = "PATH")]
    pub(crate) csv: Option<PathBuf>,

    /// Write the fundamentals export for matched symbols to this file.
    #[arg(long, value_name = "PATH")]
    pub(crate) fundamentals: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_map_with_overrides() {
        let cli = Cli::try_parse_from([
            "indmap",
            "--data-dir",
            "/srv/data",
            "--mapping",
            "mapping.csv",
            "map",
            "--flat",
            "TCS",
            "NSE:INFY",
        ])
        .unwrap();

        let config = cli.data.dataset_config();
        assert_eq!(
            config.mapping_path(),
            PathBuf::from("/srv/data").join("mapping.csv")
        );
        assert_eq!(cli.data.mapper_config().max_batch_size, 999);
        match cli.command {
            Command::Map(args) => {
                assert!(args.flat);
                assert_eq!(args.symbols, vec!["TCS", "NSE:INFY"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_flat_conflicts_with_json() {
        assert!(Cli::try_parse_from(["indmap", "map", "--flat", "--json", "TCS"]).is_err());
    }
}
