//! # capsim-core
//!
//! Deterministic cap-table mathematics: ownership, funding round
//! simulation, dilution, and snapshot formats.
//!
//! ## Constraints
//!
//! - Pure Rust, no I/O, no system clocks, no randomness
//! - Same table and round in, same outcome out, on every platform
//! - The simulation path is total; strict validation is opt-in
//!
//! ## Example
//!
//! ```
//! use capsim_core::{simulate_round, CapTable, FundingRound};
//!
//! let table = CapTable::template();
//! let round = FundingRound::new("Seed", 8_000_000.0, 2_000_000.0, 10.0);
//! let outcome = simulate_round(&table, &round);
//!
//! assert_eq!(outcome.new_investor.shares, 2_500_000);
//! assert_eq!(outcome.post_round.total_shares, 12_750_000);
//! ```

pub mod dilution;
pub mod display;
pub mod formats;
pub mod primitives;
pub mod report;
pub mod rounding;
pub mod table;
pub mod validate;

pub use dilution::{simulate_round, FundingRound, RoundOutcome, TableSnapshot};
pub use report::{LegendEntry, Reporter};
pub use rounding::{to_shares, to_shares_lossy, Rounding, ShareMathError};
pub use table::{
    calculate_ownership, ownership_pct, CapTable, Holding, Stakeholder, StakeholderId,
    StakeholderKind,
};
pub use validate::{RoundError, TableError};
