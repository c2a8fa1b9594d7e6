//! TradingView watchlist formatting.
//!
//! Both formatters re-sort internally, so the same set of matched symbols
//! always produces the same text regardless of input order, with one
//! exception: industries with equally many symbols appear in the order their
//! first symbol was seen.

use crate::{
    mapping::MatchedSymbol,
    types::{EXCHANGE_PREFIX, Symbol},
};

/// Formats matched symbols grouped by industry.
///
/// Groups are ordered by size, largest first, each rendered as
/// `###<Industry>(<count>),NSE:<A>,NSE:<B>,...` with members sorted
/// alphabetically. Groups are joined with `,`; no input gives `""`.
#[must_use]
pub fn format_grouped(matched: &[MatchedSymbol]) -> String {
    let mut groups: Vec<(&str, Vec<&Symbol>)> = Vec::new();
    for m in matched {
        match groups.iter_mut().find(|(industry, _)| *industry == m.industry) {
            Some((_, members)) => members.push(&m.symbol),
            None => groups.push((m.industry.as_str(), vec![&m.symbol])),
        }
    }

    // Stable, so equal-size groups stay in first-seen order.
    groups.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

    groups
        .into_iter()
        .map(|(industry, mut members)| {
            members.sort();
            let mut line = format!("###{industry}({})", members.len());
            for symbol in members {
                line.push(',');
                line.push_str(&symbol.with_exchange(EXCHANGE_PREFIX));
            }
            line
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats matched symbols as one alphabetical, comma-separated list of
/// `NSE:<SYMBOL>` entries; no input gives `""`.
#[must_use]
pub fn format_flat(matched: &[MatchedSymbol]) -> String {
    let mut symbols: Vec<&Symbol> = matched.iter().map(|m| &m.symbol).collect();
    symbols.sort();
    symbols
        .into_iter()
        .map(|symbol| symbol.with_exchange(EXCHANGE_PREFIX))
        .collect::<Vec<_>>()
        .join(",")
}
