//! Summary counts over the reference dataset.

use serde::{Deserialize, Serialize};

use crate::dataset::{IndustryCatalog, SymbolIndustryTable};

/// Dataset summary shown when the tool starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Rows in the symbol → industry source.
    pub total_symbols: usize,
    /// Labels in the industry catalog.
    pub total_industries: usize,
    /// Distinct labels the mapping actually uses.
    pub mapped_industries: usize,
}

impl Stats {
    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Database loaded with {} symbols mapped to {} industries out of {} available industry categories",
            group_thousands(self.total_symbols),
            self.mapped_industries,
            self.total_industries
        )
    }
}

/// Computes dataset statistics.
#[must_use]
pub fn stats(table: &SymbolIndustryTable, catalog: &IndustryCatalog) -> Stats {
    Stats {
        total_symbols: table.row_count(),
        total_industries: catalog.len(),
        mapped_industries: table.referenced_industries().count(),
    }
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
