//! # Dilution Module
//!
//! The funding round simulator: price a round against the current cap
//! table and produce the post-round ownership picture.
//!
//! ## Design
//!
//! - The simulation is total. Degenerate input (zero shares, zero or
//!   negative valuations, non-finite garbage) collapses to zero-valued
//!   allocations instead of returning errors; strict checks live in
//!   [`crate::validate`]
//! - Share counts only ever move through [`to_shares_lossy`], so the
//!   whole-share rounding policy stays uniform
//! - Dilution is keyed by stakeholder id in a `BTreeMap` for
//!   deterministic iteration and serialization

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::primitives::slugify;
use crate::rounding::to_shares_lossy;
use crate::table::{
    calculate_ownership, ownership_pct, CapTable, Holding, Stakeholder, StakeholderId,
    StakeholderKind,
};

// =============================================================================
// ROUND TYPES
// =============================================================================

/// Terms of a proposed financing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRound {
    /// Display name, e.g. `"Seed"` or `"Series A"`.
    pub name: String,
    /// Company valuation before the money lands, in currency units.
    pub pre_money: f64,
    /// New money coming in, in currency units.
    pub investment: f64,
    /// Target ESOP pool percentage after the round. A target at or below
    /// the current pool leaves the pool untouched.
    pub new_esop_pct: f64,
}

impl FundingRound {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        pre_money: f64,
        investment: f64,
        new_esop_pct: f64,
    ) -> Self {
        Self {
            name: name.into(),
            pre_money,
            investment,
            new_esop_pct,
        }
    }

    /// Valuation immediately after the investment lands.
    #[must_use]
    pub fn post_money(&self) -> f64 {
        self.pre_money + self.investment
    }
}

/// Ownership picture at one instant, with the pool broken out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub total_shares: u64,
    pub esop_shares: u64,
    pub esop_pct: f64,
    pub holdings: Vec<Holding>,
}

impl TableSnapshot {
    /// Sum of all holding percentages plus the pool percentage.
    ///
    /// 100 for a fully allocated table, less when stock is unallocated.
    #[must_use]
    pub fn coverage_pct(&self) -> f64 {
        self.holdings.iter().map(|h| h.ownership_pct).sum::<f64>() + self.esop_pct
    }
}

/// Everything the simulator derives from one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round_name: String,
    pub pre_money: f64,
    pub investment: f64,
    pub post_money: f64,
    /// Price anchored to the pre-round share count; 0 for an empty table.
    pub price_per_share: f64,
    /// The incoming investor's allocation.
    pub new_investor: Holding,
    /// Shares minted to top the ESOP pool up to its target.
    pub additional_esop_shares: u64,
    pub pre_round: TableSnapshot,
    pub post_round: TableSnapshot,
    /// Relative ownership drop per pre-round stakeholder, in percent of
    /// their previous stake. Holders who owned nothing are skipped.
    pub dilution: BTreeMap<StakeholderId, f64>,
}

impl RoundOutcome {
    /// Ownership percentage the new investor ends up with.
    #[must_use]
    pub fn new_investor_ownership(&self) -> f64 {
        self.new_investor.ownership_pct
    }

    /// Relative dilution of one stakeholder, if they held anything before.
    #[must_use]
    pub fn dilution_of(&self, id: &StakeholderId) -> Option<f64> {
        self.dilution.get(id).copied()
    }

    /// The post-round state as a standalone cap table, ready to be saved
    /// or fed into the next round.
    #[must_use]
    pub fn post_table(&self) -> CapTable {
        let stakeholders = self
            .post_round
            .holdings
            .iter()
            .map(|h| Stakeholder::new(h.id.clone(), h.name.clone(), h.kind, h.shares))
            .collect();
        CapTable {
            total_shares: self.post_round.total_shares,
            stakeholders,
            esop_pool_pct: self.post_round.esop_pct,
        }
    }
}

impl CapTable {
    /// Current state as a snapshot, pool broken out.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            total_shares: self.total_shares,
            esop_shares: self.esop_shares(),
            esop_pct: self.esop_pool_pct,
            holdings: self.holdings(),
        }
    }
}

// =============================================================================
// SIMULATION
// =============================================================================

/// Simulate a priced funding round against a cap table.
///
/// The sequence mirrors how a priced round actually closes:
///
/// 1. Post-money is pre-money plus investment
/// 2. Price per share anchors to the pre-round share count
/// 3. The investor buys `investment / price` shares, rounded to whole
/// 4. The ESOP pool tops up to its target, measured against the share
///    count after the investor but before the top-up itself; the pool
///    never shrinks
/// 5. Everyone's ownership is recomputed against the final total
///
/// Existing stakeholders keep their share counts; only percentages move.
/// The investor entry is appended after all existing holders.
#[must_use]
pub fn simulate_round(table: &CapTable, round: &FundingRound) -> RoundOutcome {
    let post_money = round.pre_money + round.investment;

    let price_per_share = if table.total_shares == 0 {
        0.0
    } else {
        round.pre_money / table.total_shares as f64
    };

    let new_investor_shares = if price_per_share > 0.0 {
        to_shares_lossy(round.investment / price_per_share)
    } else {
        0
    };

    // Pool shuffle: the target percentage is applied to the total after
    // the investor's shares but before the top-up, so issuing the top-up
    // leaves the pool slightly under target. Matches the term-sheet
    // convention of sizing the pool on the pre-top-up capitalization.
    let current_esop_shares = table.esop_shares();
    let post_investor_total = table.total_shares.saturating_add(new_investor_shares);
    let target_esop_shares =
        to_shares_lossy(round.new_esop_pct / 100.0 * post_investor_total as f64);
    let additional_esop_shares = target_esop_shares.saturating_sub(current_esop_shares);
    let final_total_shares = post_investor_total.saturating_add(additional_esop_shares);

    let pre_holdings = calculate_ownership(&table.stakeholders, table.total_shares);
    let mut post_holdings = calculate_ownership(&table.stakeholders, final_total_shares);

    let new_investor = Holding {
        id: StakeholderId::new(format!("{}-investor", slugify(&round.name))),
        name: format!("{} Investor", round.name),
        kind: StakeholderKind::Investor,
        shares: new_investor_shares,
        ownership_pct: ownership_pct(new_investor_shares, final_total_shares),
    };
    post_holdings.push(new_investor.clone());

    let mut dilution = BTreeMap::new();
    for (pre, post) in pre_holdings.iter().zip(&post_holdings) {
        if pre.ownership_pct > 0.0 {
            let drop_pct = (pre.ownership_pct - post.ownership_pct) / pre.ownership_pct * 100.0;
            dilution.insert(pre.id.clone(), drop_pct);
        }
    }

    let post_esop_shares = current_esop_shares.saturating_add(additional_esop_shares);

    RoundOutcome {
        round_name: round.name.clone(),
        pre_money: round.pre_money,
        investment: round.investment,
        post_money,
        price_per_share,
        new_investor,
        additional_esop_shares,
        pre_round: TableSnapshot {
            total_shares: table.total_shares,
            esop_shares: current_esop_shares,
            esop_pct: table.esop_pool_pct,
            holdings: pre_holdings,
        },
        post_round: TableSnapshot {
            total_shares: final_total_shares,
            esop_shares: post_esop_shares,
            esop_pct: ownership_pct(post_esop_shares, final_total_shares),
            holdings: post_holdings,
        },
        dilution,
    }
}

// =============================================================================
// TESTS
// =============================================================================
