//! # Validation Module
//!
//! Opt-in strict checks for tables and round terms.
//!
//! The simulator itself never rejects input; degenerate values degrade to
//! zero-valued output. Callers that want hard failures (the CLI `check`
//! command, API front-ends validating user input) run these first.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::dilution::FundingRound;
use crate::primitives::MAX_STAKEHOLDERS;
use crate::table::{CapTable, StakeholderId};

/// Structural problems in a cap table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("total share count is zero")]
    ZeroTotalShares,
    #[error("ESOP pool percentage {0} is outside [0, 100]")]
    EsopOutOfRange(f64),
    #[error("allocated shares {allocated} (including {esop} reserved ESOP shares) exceed total {total}")]
    Overallocated { allocated: u64, esop: u64, total: u64 },
    #[error("duplicate stakeholder id: {0}")]
    DuplicateId(StakeholderId),
    #[error("stakeholder {0} has a blank name")]
    BlankName(StakeholderId),
    #[error("{count} stakeholders exceed the supported maximum of {max}")]
    TooManyStakeholders { count: usize, max: usize },
}

/// Problems in proposed round terms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoundError {
    #[error("round name is blank")]
    BlankName,
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
    #[error("pre-money valuation must be positive, got {0}")]
    PreMoneyNotPositive(f64),
    #[error("investment must be positive, got {0}")]
    InvestmentNotPositive(f64),
    #[error("target ESOP percentage {0} is outside [0, 100]")]
    EsopTargetOutOfRange(f64),
}

impl CapTable {
    /// Strict structural validation. First failure wins.
    pub fn validate(&self) -> Result<(), TableError> {
        if !(0.0..=100.0).contains(&self.esop_pool_pct) {
            return Err(TableError::EsopOutOfRange(self.esop_pool_pct));
        }
        if self.total_shares == 0 {
            return Err(TableError::ZeroTotalShares);
        }
        if self.stakeholders.len() > MAX_STAKEHOLDERS {
            return Err(TableError::TooManyStakeholders {
                count: self.stakeholders.len(),
                max: MAX_STAKEHOLDERS,
            });
        }

        let mut seen: BTreeSet<&StakeholderId> = BTreeSet::new();
        for stakeholder in &self.stakeholders {
            if stakeholder.name.trim().is_empty() {
                return Err(TableError::BlankName(stakeholder.id.clone()));
            }
            if !seen.insert(&stakeholder.id) {
                return Err(TableError::DuplicateId(stakeholder.id.clone()));
            }
        }

        let esop = self.esop_shares();
        let allocated = self.allocated_shares().saturating_add(esop);
        if allocated > self.total_shares {
            return Err(TableError::Overallocated {
                allocated,
                esop,
                total: self.total_shares,
            });
        }

        Ok(())
    }
}

impl FundingRound {
    /// Strict term validation. First failure wins.
    pub fn validate(&self) -> Result<(), RoundError> {
        if self.name.trim().is_empty() {
            return Err(RoundError::BlankName);
        }
        for (field, value) in [
            ("pre_money", self.pre_money),
            ("investment", self.investment),
            ("new_esop_pct", self.new_esop_pct),
        ] {
            if !value.is_finite() {
                return Err(RoundError::NonFinite { field });
            }
        }
        if self.pre_money <= 0.0 {
            return Err(RoundError::PreMoneyNotPositive(self.pre_money));
        }
        if self.investment <= 0.0 {
            return Err(RoundError::InvestmentNotPositive(self.investment));
        }
        if !(0.0..=100.0).contains(&self.new_esop_pct) {
            return Err(RoundError::EsopTargetOutOfRange(self.new_esop_pct));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
