//! # Display Module
//!
//! Fixed-format rendering helpers for money, percentages, and share
//! counts, plus the legend color palette.
//!
//! All formatting is locale-free and deterministic. Structured values stay
//! in the outcome types; these helpers only produce strings for reports
//! and legends.

use crate::table::StakeholderKind;

/// Compact currency rendering.
///
/// Millions get one decimal (`$2.5M`), thousands none (`$750K`), anything
/// smaller renders as whole dollars. Not suitable for per-share prices.
#[must_use]
pub fn format_currency(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.0}K", value / 1_000.0)
    } else {
        format!("${value:.0}")
    }
}

/// Percentage with two decimals, e.g. `19.61%`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Thousands-grouped share count, e.g. `12,750,000`.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Legend palette. All kinds share the same three colors, assigned by
/// position in the table.
const PALETTE: [&str; 3] = [
    "hsl(221, 83%, 53%)",
    "hsl(262, 83%, 58%)",
    "hsl(330, 81%, 60%)",
];

/// Legend color for the stakeholder at `index`.
///
/// The kind is part of the signature for callers that color by class;
/// the current palette cycles purely by position.
#[must_use]
pub fn stakeholder_color(_kind: StakeholderKind, index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

// =============================================================================
// TESTS
// =============================================================================
