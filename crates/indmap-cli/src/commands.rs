use std::io::{self, Read, Write};

use indmap::{CsvSource, IndustryMapper, MapperError, Symbol, export_mapping_csv};
use tracing::info;

use crate::cli::{Cli, Command, MapArgs};
use crate::error::CliError;

pub(crate) async fn run(cli: &Cli) -> Result<(), CliError> {
    let source = CsvSource::new(cli.data.dataset_config());
    let mapper = IndustryMapper::load(&source)
        .await?
        .with_config(cli.data.mapper_config());

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match &cli.command {
        Command::Map(args) => {
            let raw = if args.symbols.is_empty() {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                args.symbols.join(",")
            };
            map(&mapper, args, &raw, &mut out, &mut err)
        }
        Command::Stats => {
            writeln!(out, "{}", mapper.stats().summary())?;
            Ok(())
        }
        Command::Industries => {
            for industry in mapper.available_industries() {
                writeln!(out, "{industry}")?;
            }
            Ok(())
        }
    }
}

fn map(
    mapper: &IndustryMapper,
    args: &MapArgs,
    raw: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    if raw.trim().is_empty() {
        return Err(MapperError::Validation(
            "Please enter some symbols to process.".to_string(),
        )
        .into());
    }
    let result = mapper.map_symbols(raw)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else if result.is_empty() {
        writeln!(err, "No valid symbols found.")?;
    } else {
        if args.table {
            writeln!(out, "{}", result.to_frame()?)?;
        }
        let watchlist = if args.flat {
            mapper.format_flat(&result)
        } else {
            mapper.format_grouped(&result)
        };
        writeln!(out, "{watchlist}")?;
    }

    if let Some(path) = &args.csv {
        let export = export_mapping_csv(&result.sorted_by_industry_frequency())?;
        std::fs::write(path, export)?;
        info!(path = %path.display(), "Wrote symbol/industry export");
    }

    if let Some(path) = &args.fundamentals {
        let symbols: Vec<Symbol> = result.symbols().cloned().collect();
        let table = mapper.fundamentals_for(&symbols);
        if table.is_empty() {
            writeln!(err, "No fundamental data found for the selected symbols.")?;
        } else {
            std::fs::write(path, table.to_csv()?)?;
            info!(path = %path.display(), rows = table.len(), "Wrote fundamentals export");
        }
    }

    if !result.unmatched().is_empty() {
        let unmatched: Vec<&str> = result.unmatched().iter().map(Symbol::as_str).collect();
        writeln!(
            err,
            "Invalid or unmapped symbols ({}): {}",
            unmatched.len(),
            unmatched.join(", ")
        )?;
    }

    Ok(())
}
