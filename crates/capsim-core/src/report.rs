//! # Report Module
//!
//! Text and legend rendering for tables and round outcomes.
//!
//! Reports are presentation only. The numbers all live in
//! [`crate::dilution::RoundOutcome`] and [`crate::dilution::TableSnapshot`];
//! this module turns them into the box-drawn blocks the CLI prints and the
//! name/color pairs chart consumers use.

use serde::{Deserialize, Serialize};

use crate::dilution::{RoundOutcome, TableSnapshot};
use crate::display::{format_currency, format_percentage, group_thousands, stakeholder_color};
use crate::table::StakeholderKind;

/// One chart legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

/// Renders snapshots and outcomes into human-readable form.
pub struct Reporter;

const RULE: &str = "─────────────────────────────────────";

impl Reporter {
    /// Box-drawn summary of a table snapshot.
    #[must_use]
    pub fn table_text(snapshot: &TableSnapshot) -> String {
        let mut out = String::new();
        out.push_str(&format!("┌{RULE}┐\n"));
        out.push_str(&header_line("CAP TABLE"));
        out.push_str(&format!("├{RULE}┤\n"));
        push_holdings(&mut out, snapshot, None);
        out.push_str(&format!("├{RULE}┤\n"));
        out.push_str(&format!(
            "│ TOTAL {} shares ({} covered)\n",
            group_thousands(snapshot.total_shares),
            format_percentage(snapshot.coverage_pct()),
        ));
        out.push_str(&format!("└{RULE}┘\n"));
        out
    }

    /// Box-drawn before/after summary of a simulated round.
    #[must_use]
    pub fn round_text(outcome: &RoundOutcome) -> String {
        let mut out = String::new();
        out.push_str(&format!("┌{RULE}┐\n"));
        out.push_str(&header_line("ROUND TERMS"));
        out.push_str(&format!("├{RULE}┤\n"));
        out.push_str(&format!("│ - name: {}\n", outcome.round_name));
        out.push_str(&format!(
            "│ - pre-money {} + investment {} = post-money {}\n",
            format_currency(outcome.pre_money),
            format_currency(outcome.investment),
            format_currency(outcome.post_money),
        ));
        out.push_str(&format!(
            "│ - price per share: ${:.2}\n",
            outcome.price_per_share
        ));
        out.push_str(&format!(
            "│ - new investor shares: {}\n",
            group_thousands(outcome.new_investor.shares)
        ));
        out.push_str(&format!(
            "│ - ESOP top-up: {} shares\n",
            group_thousands(outcome.additional_esop_shares)
        ));

        out.push_str(&format!("├{RULE}┤\n"));
        out.push_str(&header_line("PRE-ROUND"));
        out.push_str(&format!("├{RULE}┤\n"));
        push_holdings(&mut out, &outcome.pre_round, None);

        out.push_str(&format!("├{RULE}┤\n"));
        out.push_str(&header_line("POST-ROUND"));
        out.push_str(&format!("├{RULE}┤\n"));
        push_holdings(&mut out, &outcome.post_round, Some(outcome));

        out.push_str(&format!("└{RULE}┘\n"));
        out
    }

    /// Name/color pairs for chart rendering, pool included when reserved.
    #[must_use]
    pub fn legend(snapshot: &TableSnapshot) -> Vec<LegendEntry> {
        let mut entries: Vec<LegendEntry> = snapshot
            .holdings
            .iter()
            .enumerate()
            .map(|(i, h)| LegendEntry {
                name: h.name.clone(),
                color: stakeholder_color(h.kind, i).to_string(),
            })
            .collect();
        if snapshot.esop_shares > 0 {
            entries.push(LegendEntry {
                name: "ESOP Pool".to_string(),
                color: stakeholder_color(StakeholderKind::Employee, snapshot.holdings.len())
                    .to_string(),
            });
        }
        entries
    }
}

fn header_line(title: &str) -> String {
    format!("│ {title:<36}│\n")
}

/// Holding lines plus the pool line. With an outcome, existing holders get
/// their relative dilution suffix.
fn push_holdings(out: &mut String, snapshot: &TableSnapshot, outcome: Option<&RoundOutcome>) {
    if snapshot.holdings.is_empty() {
        out.push_str("│ - (none)                            │\n");
    }
    for holding in &snapshot.holdings {
        out.push_str(&format!(
            "│ - {} [{}] {} shares ({})",
            holding.name,
            holding.kind,
            group_thousands(holding.shares),
            format_percentage(holding.ownership_pct),
        ));
        if let Some(drop_pct) = outcome.and_then(|o| o.dilution_of(&holding.id)) {
            out.push_str(&format!(" down {}", format_percentage(drop_pct)));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "│ - ESOP pool {} shares ({})\n",
        group_thousands(snapshot.esop_shares),
        format_percentage(snapshot.esop_pct),
    ));
}

// =============================================================================
// TESTS
// =============================================================================
