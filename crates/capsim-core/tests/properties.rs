//! Property tests for the round simulator and snapshot codec.
//!
//! Tables are generated "consistent": stakeholder shares plus the reserved
//! pool add up to the total, so ownership percentages must cover 100%.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use capsim_core::formats::{decode_snapshot, encode_snapshot};
use capsim_core::{
    simulate_round, CapTable, FundingRound, Stakeholder, StakeholderKind,
};
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn arb_kind() -> impl Strategy<Value = StakeholderKind> {
    prop_oneof![
        Just(StakeholderKind::Founder),
        Just(StakeholderKind::Employee),
        Just(StakeholderKind::Advisor),
        Just(StakeholderKind::Investor),
    ]
}

/// A consistent table: total = stakeholder shares + reserved ESOP shares,
/// with at least one nonzero holder.
fn arb_consistent_table() -> impl Strategy<Value = CapTable> {
    (
        prop::collection::vec((1_u64..=50_000_000, arb_kind()), 1..12),
        0_u64..=20_000_000,
    )
        .prop_map(|(entries, esop_shares)| {
            let stakeholders: Vec<Stakeholder> = entries
                .into_iter()
                .enumerate()
                .map(|(i, (shares, kind))| {
                    Stakeholder::new(format!("s-{i}"), format!("Holder {i}"), kind, shares)
                })
                .collect();
            let allocated: u64 = stakeholders.iter().map(|s| s.shares).sum();
            let total_shares = allocated + esop_shares;
            let esop_pool_pct = esop_shares as f64 / total_shares as f64 * 100.0;
            CapTable {
                total_shares,
                stakeholders,
                esop_pool_pct,
            }
        })
}

fn arb_round() -> impl Strategy<Value = FundingRound> {
    (
        1_000.0_f64..=1.0e9,
        1_000.0_f64..=1.0e9,
        0.0_f64..=50.0,
    )
        .prop_map(|(pre_money, investment, new_esop_pct)| {
            FundingRound::new("Prop Round", pre_money, investment, new_esop_pct)
        })
}

// =============================================================================
// SIMULATION PROPERTIES
// =============================================================================

proptest! {
    /// Post-round ownership of a consistent table always covers 100%.
    #[test]
    fn ownership_always_sums_to_full(
        table in arb_consistent_table(),
        round in arb_round(),
    ) {
        let outcome = simulate_round(&table, &round);
        let pre = outcome.pre_round.coverage_pct();
        let post = outcome.post_round.coverage_pct();
        prop_assert!((pre - 100.0).abs() < 1e-6, "pre coverage was {pre}");
        prop_assert!((post - 100.0).abs() < 1e-6, "post coverage was {post}");
    }

    /// Without a pool top-up the investor's stake matches
    /// investment / post-money, up to whole-share rounding.
    #[test]
    fn investor_ratio_without_top_up(
        table in arb_consistent_table(),
        (pre_money, investment) in (1_000.0_f64..=1.0e9, 1_000.0_f64..=1.0e9),
    ) {
        let round = FundingRound::new("No Pool", pre_money, investment, 0.0);
        let outcome = simulate_round(&table, &round);
        prop_assert_eq!(outcome.additional_esop_shares, 0);

        let ideal = investment / (pre_money + investment) * 100.0;
        let actual = outcome.new_investor_ownership();
        // One whole share of slack against the final total.
        let slack = 100.0 / outcome.post_round.total_shares as f64 + 1e-9;
        prop_assert!(
            (actual - ideal).abs() <= slack,
            "ideal {ideal}, actual {actual}, slack {slack}"
        );
    }

    /// Existing stakeholders never gain or lose shares in a round.
    #[test]
    fn share_counts_are_preserved(
        table in arb_consistent_table(),
        round in arb_round(),
    ) {
        let outcome = simulate_round(&table, &round);
        prop_assert_eq!(
            outcome.post_round.holdings.len(),
            table.stakeholders.len() + 1
        );
        for (pre, post) in table.stakeholders.iter().zip(&outcome.post_round.holdings) {
            prop_assert_eq!(&pre.id, &post.id);
            prop_assert_eq!(pre.shares, post.shares);
        }
    }

    /// The ESOP pool only ever grows.
    #[test]
    fn pool_never_shrinks(
        table in arb_consistent_table(),
        round in arb_round(),
    ) {
        let outcome = simulate_round(&table, &round);
        prop_assert!(outcome.post_round.esop_shares >= outcome.pre_round.esop_shares);
    }

    /// Every existing holder loses the same fraction of their stake, and
    /// that fraction stays within [0, 100].
    #[test]
    fn dilution_is_uniform_and_bounded(
        table in arb_consistent_table(),
        round in arb_round(),
    ) {
        let outcome = simulate_round(&table, &round);
        let mut values = outcome.dilution.values().copied();
        if let Some(first) = values.next() {
            prop_assert!((0.0..=100.0).contains(&first), "dilution {first}");
            for v in values {
                prop_assert!((first - v).abs() < 1e-6, "uneven dilution {first} vs {v}");
            }
        }
    }

    /// Same inputs, same outcome.
    #[test]
    fn simulation_is_deterministic(
        table in arb_consistent_table(),
        round in arb_round(),
    ) {
        let a = simulate_round(&table, &round);
        let b = simulate_round(&table, &round);
        prop_assert_eq!(a, b);
    }

    /// Garbage round terms never produce NaN or infinite percentages.
    #[test]
    fn degenerate_terms_stay_finite(
        table in arb_consistent_table(),
        pre_money in prop_oneof![
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            Just(-1.0e9),
            Just(0.0),
        ],
    ) {
        let round = FundingRound::new("Garbage", pre_money, 1.0e6, 10.0);
        let outcome = simulate_round(&table, &round);
        for holding in &outcome.post_round.holdings {
            prop_assert!(holding.ownership_pct.is_finite());
        }
        prop_assert!(outcome.post_round.esop_pct.is_finite());
    }
}

// =============================================================================
// SNAPSHOT CODEC PROPERTIES
// =============================================================================

proptest! {
    /// Encode/decode is the identity on tables, and encoding is
    /// byte-for-byte deterministic.
    #[test]
    fn snapshot_codec_round_trips(table in arb_consistent_table()) {
        let encoded = encode_snapshot(&table).unwrap();
        let again = encode_snapshot(&table).unwrap();
        prop_assert_eq!(&encoded, &again);

        let decoded = decode_snapshot(&encoded).unwrap();
        prop_assert_eq!(decoded, table);
    }
}
