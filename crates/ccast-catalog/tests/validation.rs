//! Rejection paths for catalog loading: a document that parses but breaks an
//! invariant must never become a servable catalog.

use ccast_catalog::Catalog;
use ccast_error::CcastError;
use ccast_types::{IndustryId, MarketId};

fn valid() -> Catalog {
    Catalog::builtin().unwrap()
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = Catalog::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, CcastError::Json(_)));
}

#[test]
fn zero_price_is_rejected() {
    let mut catalog = valid();
    catalog
        .markets
        .prices
        .insert(MarketId::new("voluntary_market"), 0.0);
    let violations = catalog.lint();
    assert!(violations.iter().any(|v| v.section == "markets"));
}

#[test]
fn missing_default_market_is_rejected() {
    let mut catalog = valid();
    catalog.markets.default_market = MarketId::new("phantom_market");
    assert!(catalog.lint().iter().any(|v| v.section == "markets"));
}

#[test]
fn out_of_range_efficiency_is_rejected() {
    let mut catalog = valid();
    catalog
        .industries
        .get_mut(&IndustryId::new("cement_industry"))
        .unwrap()
        .capture_efficiency = 1.4;
    assert!(catalog.lint().iter().any(|v| v.section == "industries"));
}

#[test]
fn non_increasing_target_years_are_rejected() {
    let mut catalog = valid();
    let first_year = catalog.policy.targets[0].year;
    catalog.policy.targets[1].year = first_year;
    assert!(catalog.lint().iter().any(|v| v.section == "policy"));
}

#[test]
fn total_capacity_below_formation_sum_is_rejected() {
    let mut catalog = valid();
    let region = catalog.regions.values_mut().next().unwrap();
    region.total_capacity_mt = 1.0;
    assert!(catalog.lint().iter().any(|v| v.section == "regions"));
}

#[test]
fn level_ladder_must_start_at_zero() {
    let mut catalog = valid();
    catalog.engagement.levels[0].threshold = 10.0;
    assert!(catalog.lint().iter().any(|v| v.section == "engagement"));
}

#[test]
fn sub_unit_distance_factor_is_rejected() {
    let mut catalog = valid();
    catalog.distances.pairs[0].factor = 0.5;
    assert!(catalog.lint().iter().any(|v| v.section == "distances"));
}

#[test]
fn invalid_document_fails_the_load_with_every_reason() {
    let mut catalog = valid();
    catalog
        .markets
        .prices
        .insert(MarketId::new("voluntary_market"), -1.0);
    catalog.policy.targets[1].year = 1990;
    let doc = serde_json::to_string(&catalog).unwrap();
    let err = Catalog::from_json_str(&doc).unwrap_err();
    match err {
        CcastError::Catalog { reason } => {
            assert!(reason.contains("markets"), "got: {reason}");
            assert!(reason.contains("policy"), "got: {reason}");
        }
        other => panic!("expected Catalog rejection, got {other}"),
    }
}
