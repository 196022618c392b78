//! Load-time catalog validation.
//!
//! Validation returns every violation rather than stopping at the first so
//! an operator fixing a rejected document sees the whole damage report in
//! one pass.

use std::fmt;

use crate::Catalog;

/// One validation failure, tagged with the catalog section it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogViolation {
    pub section: &'static str,
    pub message: String,
}

impl CatalogViolation {
    fn new(section: &'static str, message: impl Into<String>) -> Self {
        Self {
            section,
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.section, self.message)
    }
}

/// Check every catalog invariant. Empty result means the catalog is
/// servable.
pub fn validate(catalog: &Catalog) -> Vec<CatalogViolation> {
    let mut out = Vec::new();

    if catalog.schema_version != crate::CATALOG_SCHEMA_VERSION {
        out.push(CatalogViolation::new(
            "schema",
            format!(
                "schema_version {} unsupported (expected {})",
                catalog.schema_version,
                crate::CATALOG_SCHEMA_VERSION
            ),
        ));
    }
    if catalog.fx_rate_usd <= 0.0 {
        out.push(CatalogViolation::new(
            "fx",
            format!("fx_rate_usd must be positive, got {}", catalog.fx_rate_usd),
        ));
    }

    if catalog.industries.is_empty() {
        out.push(CatalogViolation::new("industries", "table is empty"));
    }
    for (id, profile) in &catalog.industries {
        if !(profile.capture_efficiency > 0.0 && profile.capture_efficiency <= 1.0) {
            out.push(CatalogViolation::new(
                "industries",
                format!(
                    "{id}: capture_efficiency {} outside (0, 1]",
                    profile.capture_efficiency
                ),
            ));
        }
    }

    for (id, region) in &catalog.regions {
        let formation_sum: f64 = region.formations.values().sum();
        for (kind, capacity) in &region.formations {
            if *capacity < 0.0 {
                out.push(CatalogViolation::new(
                    "regions",
                    format!("{id}: negative capacity for {kind}"),
                ));
            }
        }
        // Survey totals may exceed the per-formation breakdown, never trail it.
        if region.total_capacity_mt + 1e-9 < formation_sum {
            out.push(CatalogViolation::new(
                "regions",
                format!(
                    "{id}: total_capacity_mt {} below formation sum {formation_sum}",
                    region.total_capacity_mt
                ),
            ));
        }
    }

    for pair in &catalog.distances.pairs {
        if pair.factor < 1.0 {
            out.push(CatalogViolation::new(
                "distances",
                format!("{}-{}: factor {} below 1.0", pair.a, pair.b, pair.factor),
            ));
        }
    }
    if catalog.distances.unknown_pair_factor < 1.0 {
        out.push(CatalogViolation::new(
            "distances",
            "unknown_pair_factor below 1.0",
        ));
    }
    if catalog.distances.no_home_factor < 1.0 {
        out.push(CatalogViolation::new("distances", "no_home_factor below 1.0"));
    }

    for (id, pathway) in &catalog.pathways {
        if !(pathway.efficiency > 0.0 && pathway.efficiency <= 1.0) {
            out.push(CatalogViolation::new(
                "pathways",
                format!("{id}: efficiency {} outside (0, 1]", pathway.efficiency),
            ));
        }
        if !(pathway.capacity_factor > 0.0 && pathway.capacity_factor <= 1.0) {
            out.push(CatalogViolation::new(
                "pathways",
                format!(
                    "{id}: capacity_factor {} outside (0, 1]",
                    pathway.capacity_factor
                ),
            ));
        }
    }

    for (id, price) in &catalog.markets.prices {
        if *price <= 0.0 {
            out.push(CatalogViolation::new(
                "markets",
                format!("{id}: price {price} must be positive"),
            ));
        }
    }
    if !catalog
        .markets
        .prices
        .contains_key(&catalog.markets.default_market)
    {
        out.push(CatalogViolation::new(
            "markets",
            format!(
                "default_market `{}` missing from price table",
                catalog.markets.default_market
            ),
        ));
    }

    validate_policy(catalog, &mut out);
    validate_engagement(catalog, &mut out);

    out
}

fn validate_policy(catalog: &Catalog, out: &mut Vec<CatalogViolation>) {
    let policy = &catalog.policy;
    if policy.targets.is_empty() {
        out.push(CatalogViolation::new("policy", "target schedule is empty"));
        return;
    }
    for window in policy.targets.windows(2) {
        if window[1].year <= window[0].year {
            out.push(CatalogViolation::new(
                "policy",
                format!(
                    "target years not strictly increasing: {} then {}",
                    window[0].year, window[1].year
                ),
            ));
        }
    }
    for target in &policy.targets {
        if target.capture_mt <= 0.0 {
            out.push(CatalogViolation::new(
                "policy",
                format!("{}: capture_mt must be positive", target.year),
            ));
        }
    }
    if policy.net_zero_year < policy.reference_year {
        out.push(CatalogViolation::new(
            "policy",
            "net_zero_year precedes reference_year",
        ));
    }
    let inc = &policy.incentives;
    if !(inc.credit_threshold_tonnes < inc.subsidy_threshold_tonnes
        && inc.subsidy_threshold_tonnes < inc.priority_threshold_tonnes)
    {
        out.push(CatalogViolation::new(
            "policy",
            "incentive thresholds must be strictly ascending",
        ));
    }
    for (name, rate) in [
        ("credit_rate_per_tonne", inc.credit_rate_per_tonne),
        ("subsidy_rate_per_tonne", inc.subsidy_rate_per_tonne),
        ("priority_rate_per_tonne", inc.priority_rate_per_tonne),
    ] {
        if rate < 0.0 {
            out.push(CatalogViolation::new(
                "policy",
                format!("{name} must be non-negative"),
            ));
        }
    }
}

fn validate_engagement(catalog: &Catalog, out: &mut Vec<CatalogViolation>) {
    let rules = &catalog.engagement;
    for (name, value) in [
        ("offset_points_per_tonne", rules.offset_points_per_tonne),
        ("offset_cap", rules.offset_cap),
        (
            "awareness_points_per_interaction",
            rules.awareness_points_per_interaction,
        ),
        ("awareness_cap", rules.awareness_cap),
        ("action_points_per_action", rules.action_points_per_action),
        ("action_cap", rules.action_cap),
        (
            "points_per_action_estimate",
            rules.points_per_action_estimate,
        ),
    ] {
        if value <= 0.0 {
            out.push(CatalogViolation::new(
                "engagement",
                format!("{name} must be positive, got {value}"),
            ));
        }
    }

    if rules.levels.is_empty() {
        out.push(CatalogViolation::new("engagement", "level ladder is empty"));
    } else {
        if rules.levels[0].threshold != 0.0 {
            out.push(CatalogViolation::new(
                "engagement",
                "level ladder must start at threshold 0",
            ));
        }
        for window in rules.levels.windows(2) {
            if window[1].threshold <= window[0].threshold {
                out.push(CatalogViolation::new(
                    "engagement",
                    format!(
                        "level thresholds not strictly increasing: {} then {}",
                        window[0].threshold, window[1].threshold
                    ),
                ));
            }
        }
    }

    for rule in &rules.achievements {
        if rule.thresholds.is_empty() {
            out.push(CatalogViolation::new(
                "engagement",
                format!("{}: empty threshold ladder", rule.category),
            ));
        }
        for window in rule.thresholds.windows(2) {
            if window[1] <= window[0] {
                out.push(CatalogViolation::new(
                    "engagement",
                    format!("{}: thresholds not strictly increasing", rule.category),
                ));
            }
        }
    }
}
