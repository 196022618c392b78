//! Property obligations for the analysis engine.

use ccast_catalog::Catalog;
use ccast_core::{capture, credits, gamification, policy, utilization};
use ccast_types::{ActivityLedger, IndustryId, MarketId};
use proptest::prelude::*;

fn catalog() -> Catalog {
    Catalog::builtin().unwrap()
}

proptest! {
    /// Mass balance: capturable and remaining tonnage rejoin the input for
    /// every cataloged industry.
    #[test]
    fn capture_mass_balance(
        emissions in 1.0f64..1e9,
        industry_pick in 0usize..64,
    ) {
        let catalog = catalog();
        let keys: Vec<IndustryId> = catalog.industries.keys().cloned().collect();
        let industry = &keys[industry_pick % keys.len()];
        let estimate = capture::estimate(&catalog, industry, emissions).unwrap();
        let rejoined = estimate.capturable_co2_tonnes + estimate.remaining_emissions_tonnes;
        prop_assert!(
            (rejoined - emissions).abs() <= emissions * 1e-12,
            "{industry}: {rejoined} != {emissions}"
        );
        prop_assert!(estimate.capturable_co2_tonnes > 0.0);
        prop_assert!(estimate.remaining_emissions_tonnes >= 0.0);
    }

    /// Keys absent from the catalog always fail, and the error carries the
    /// full supported list.
    #[test]
    fn unknown_industry_always_errors(suffix in "[a-z]{4,12}") {
        let catalog = catalog();
        let bogus = IndustryId::new(format!("nonexistent_{suffix}"));
        let err = capture::estimate(&catalog, &bogus, 100.0).unwrap_err();
        match err {
            ccast_error::CcastError::UnknownIndustry { supported, .. } => {
                prop_assert_eq!(supported.len(), catalog.industries.len());
            }
            other => prop_assert!(false, "expected UnknownIndustry, got {}", other),
        }
    }

    /// Doubling the CO2 volume doubles every exploitable volume exactly and
    /// never reorders the pathway list.
    #[test]
    fn utilization_order_is_volume_invariant(co2 in 1.0f64..1e9) {
        let catalog = catalog();
        let base = utilization::rank(&catalog, co2).unwrap();
        let doubled = utilization::rank(&catalog, co2 * 2.0).unwrap();
        for (a, b) in base.iter().zip(&doubled) {
            prop_assert_eq!(&a.pathway, &b.pathway);
            prop_assert_eq!(b.utilizable_co2_tonnes, 2.0 * a.utilizable_co2_tonnes);
        }
    }

    /// Credit value is linear in stored tonnage for a fixed market.
    #[test]
    fn credit_value_scales_linearly(co2 in 1.0f64..1e9, scale in 2.0f64..100.0) {
        let catalog = catalog();
        let market = MarketId::new("compliance_market");
        let one = credits::value(&catalog, co2, Some(&market)).unwrap();
        let scaled = credits::value(&catalog, co2 * scale, Some(&market)).unwrap();
        let expected = one.total_value * scale;
        prop_assert!(
            (scaled.total_value - expected).abs() <= expected.abs() * 1e-12,
            "{} vs {expected}",
            scaled.total_value
        );
    }

    /// The alignment score stays inside [0, 100] for any non-negative
    /// capture volume and any start year.
    #[test]
    fn alignment_score_bounded(
        tonnes in 0.0f64..1e15,
        start_year in proptest::option::of(2000u16..2100),
    ) {
        let catalog = catalog();
        let assessment = policy::assess(&catalog, tonnes, start_year).unwrap();
        prop_assert!(assessment.alignment_score >= 0.0);
        prop_assert!(assessment.alignment_score <= 100.0);
        prop_assert!(assessment.contribution_percent >= 0.0);
    }

    /// Sub-scores clamp at their caps and the total never exceeds 2000, no
    /// matter how large the ledger counters grow.
    #[test]
    fn engagement_scores_clamp(
        offset in 0.0f64..1e12,
        interactions in 0u64..u64::MAX,
        actions in 0u64..u64::MAX,
    ) {
        let catalog = catalog();
        let ledger = ActivityLedger {
            co2_offset_tonnes: offset,
            content_interactions: interactions,
            actions_taken: actions,
        };
        let report = gamification::score(&catalog, &ledger).unwrap();
        prop_assert!(report.scores.carbon_offset <= 1_000.0);
        prop_assert!(report.scores.awareness <= 500.0);
        prop_assert!(report.scores.action <= 500.0);
        prop_assert!(report.scores.total <= 2_000.0);
        prop_assert!(report.level.level >= 1);
        prop_assert!(report.level.level <= catalog.engagement.levels.len() as u32);
    }
}
