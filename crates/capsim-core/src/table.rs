//! # Cap Table Module
//!
//! The ownership ledger: who holds how many shares, plus the reserved
//! employee option pool.
//!
//! ## Design
//!
//! - Share counts are whole `u64` values; percentages are always derived,
//!   never stored per stakeholder
//! - The table never generates identifiers. Callers mint them (the CLI
//!   uses UUIDs, round simulation derives slugs)
//! - Stakeholder order is preserved as inserted; anything keyed by id
//!   uses `BTreeMap` downstream for deterministic iteration

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rounding::to_shares_lossy;

// =============================================================================
// IDENTIFIERS AND KINDS
// =============================================================================

/// Opaque stakeholder identifier.
///
/// Ordered and hashable so it can key a `BTreeMap`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StakeholderId(pub String);

impl StakeholderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StakeholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StakeholderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StakeholderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Stakeholder classification.
///
/// Purely descriptive: no engine math differs by kind, it only drives
/// labels and legend colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeholderKind {
    Founder,
    Employee,
    Advisor,
    Investor,
}

impl StakeholderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Founder => "founder",
            Self::Employee => "employee",
            Self::Advisor => "advisor",
            Self::Investor => "investor",
        }
    }
}

impl fmt::Display for StakeholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StakeholderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "founder" => Ok(Self::Founder),
            "employee" => Ok(Self::Employee),
            "advisor" => Ok(Self::Advisor),
            "investor" => Ok(Self::Investor),
            other => Err(format!("unknown stakeholder kind: {other}")),
        }
    }
}

// =============================================================================
// THE TABLE
// =============================================================================

/// A party holding equity on the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: StakeholderId,
    pub name: String,
    pub kind: StakeholderKind,
    pub shares: u64,
}

impl Stakeholder {
    #[must_use]
    pub fn new(
        id: impl Into<StakeholderId>,
        name: impl Into<String>,
        kind: StakeholderKind,
        shares: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            shares,
        }
    }
}

/// A stakeholder annotated with its derived ownership percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: StakeholderId,
    pub name: String,
    pub kind: StakeholderKind,
    pub shares: u64,
    pub ownership_pct: f64,
}

/// The aggregate ownership state of a company at one point in time.
///
/// `total_shares` is authoritative: it may exceed the sum of stakeholder
/// shares plus the reserved pool (unallocated stock), and strict
/// validation flags the opposite case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapTable {
    /// Fully issued and reserved share count.
    pub total_shares: u64,
    /// Individual holders, in insertion order.
    pub stakeholders: Vec<Stakeholder>,
    /// Reserved employee option pool, as a percentage of `total_shares`.
    pub esop_pool_pct: f64,
}

impl CapTable {
    /// Empty table with the given totals.
    #[must_use]
    pub fn new(total_shares: u64, esop_pool_pct: f64) -> Self {
        Self {
            total_shares,
            stakeholders: Vec::new(),
            esop_pool_pct,
        }
    }

    /// Starter table for a fresh modeling session: two founders at a
    /// 5M/3M split on 10M total shares with a 10% option pool.
    #[must_use]
    pub fn template() -> Self {
        Self {
            total_shares: 10_000_000,
            stakeholders: vec![
                Stakeholder::new("founder-1", "Founder 1", StakeholderKind::Founder, 5_000_000),
                Stakeholder::new("founder-2", "Founder 2", StakeholderKind::Founder, 3_000_000),
            ],
            esop_pool_pct: 10.0,
        }
    }

    /// Derived per-stakeholder ownership percentages.
    #[must_use]
    pub fn holdings(&self) -> Vec<Holding> {
        calculate_ownership(&self.stakeholders, self.total_shares)
    }

    /// Ownership percentage of one stakeholder, if present.
    #[must_use]
    pub fn ownership_of(&self, id: &StakeholderId) -> Option<f64> {
        self.stakeholders
            .iter()
            .find(|s| &s.id == id)
            .map(|s| ownership_pct(s.shares, self.total_shares))
    }

    /// Whole-share size of the reserved option pool.
    #[must_use]
    pub fn esop_shares(&self) -> u64 {
        to_shares_lossy(self.esop_pool_pct / 100.0 * self.total_shares as f64)
    }

    /// Sum of all stakeholder share counts, saturating.
    #[must_use]
    pub fn allocated_shares(&self) -> u64 {
        self.stakeholders
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.shares))
    }
}

/// Ownership percentages for a slice of stakeholders.
///
/// A zero denominator yields all-zero percentages rather than NaN.
#[must_use]
pub fn calculate_ownership(stakeholders: &[Stakeholder], total_shares: u64) -> Vec<Holding> {
    stakeholders
        .iter()
        .map(|s| Holding {
            id: s.id.clone(),
            name: s.name.clone(),
            kind: s.kind,
            shares: s.shares,
            ownership_pct: ownership_pct(s.shares, total_shares),
        })
        .collect()
}

/// `shares / total_shares * 100`, or 0 when the denominator is 0.
#[must_use]
pub fn ownership_pct(shares: u64, total_shares: u64) -> f64 {
    if total_shares == 0 {
        0.0
    } else {
        shares as f64 / total_shares as f64 * 100.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
