//! Free-text symbol normalization.

use std::collections::HashSet;

use crate::types::Symbol;

/// Newlines and semicolons separate symbols just like commas.
const fn is_separator(c: char) -> bool {
    matches!(c, ',' | ';' | '\n')
}

/// Turns raw user input into an ordered, deduplicated list of canonical symbols.
///
/// Tokens are split on `,`, `;` and newlines, trimmed, uppercased and stripped
/// of any leading `NSE:`. Blank tokens are dropped. A symbol seen a second time is
/// dropped; the first occurrence keeps its position.
///
/// No batch limit is applied here.
#[must_use]
pub fn normalize(raw: &str) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    raw.split(is_separator)
        .map(Symbol::new)
        .filter(|symbol| !symbol.is_empty())
        .filter(|symbol| seen.insert(symbol.clone()))
        .collect()
}
