//! Delimited-text exports of tabular results.
//!
//! Exports are comma-separated with a header row that is written even when
//! there are no records.

use serde::Serialize;

use crate::{
    error::{MapperError, Result},
    mapping::MatchedSymbol,
};

/// Header of the symbol/industry export.
pub const MAPPING_HEADERS: [&str; 2] = ["Symbol", "Industry"];

/// Renders matched symbols as a `Symbol,Industry` export.
///
/// Rows are written in the order given; pass
/// [`MappingResult::sorted_by_industry_frequency`](crate::mapping::MappingResult::sorted_by_industry_frequency)
/// for the usual ordering.
///
/// # Errors
///
/// Returns [`MapperError::Export`] if a row cannot be serialized.
pub fn export_mapping_csv(rows: &[MatchedSymbol]) -> Result<String> {
    write_delimited(&MAPPING_HEADERS, rows)
}

pub(crate) fn write_delimited<T: Serialize>(headers: &[&str], records: &[T]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|e| MapperError::Export(e.to_string()))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| MapperError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MapperError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MapperError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_export() {
        let rows = vec![
            MatchedSymbol::new("TCS", "IT - Software"),
            MatchedSymbol::new("HDFCBANK", "Private Sector Bank"),
        ];
        assert_eq!(
            export_mapping_csv(&rows).unwrap(),
            "Symbol,Industry\nTCS,IT - Software\nHDFCBANK,Private Sector Bank\n"
        );
    }

    #[test]
    fn test_empty_export_keeps_header() {
        assert_eq!(export_mapping_csv(&[]).unwrap(), "Symbol,Industry\n");
    }
}
