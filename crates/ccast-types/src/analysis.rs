//! Request and result shapes for the CCUS analysis pipeline.
//!
//! Everything here is plain, serializable data: the engine computes these
//! values and hands them to whatever boundary is in front of it. No type in
//! this module owns behavior beyond small classification helpers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{IndustryId, MarketId, PathwayId, RegionId};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Input to the comprehensive analysis pipeline.
///
/// `annual_emissions_tonnes` must be positive; boundaries validate before
/// calling in and the engine rejects non-positive values defensively.
/// `home_region` and `credit_market` are optional: a missing or unknown
/// market resolves to the catalog default rather than failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub industry: IndustryId,
    pub annual_emissions_tonnes: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_region: Option<RegionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_market: Option<MarketId>,
}

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

/// Outcome of capture estimation for one industry and emissions volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureEstimate {
    pub industry: IndustryId,
    pub annual_emissions_tonnes: f64,
    /// Capture efficiency expressed as a percentage (0, 100].
    pub efficiency_percent: f64,
    pub capturable_co2_tonnes: f64,
    pub remaining_emissions_tonnes: f64,
    /// Same scale as `efficiency_percent`; carried separately because the
    /// two answer different questions at the boundary (what the technology
    /// removes vs. what the facility achieves).
    pub reduction_percent: f64,
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Geological formation classes the storage catalog breaks capacity into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FormationKind {
    DepletedOilWells,
    SalineAquifers,
    CoalSeams,
}

impl fmt::Display for FormationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepletedOilWells => f.write_str("depleted oil wells"),
            Self::SalineAquifers => f.write_str("saline aquifers"),
            Self::CoalSeams => f.write_str("coal seams"),
        }
    }
}

/// One ranked storage destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageCandidate {
    pub region: RegionId,
    pub total_capacity_mt: f64,
    /// Capacity split by formation class, in megatonnes.
    pub formations: BTreeMap<FormationKind, f64>,
    pub known_projects: Vec<String>,
    pub description: String,
    /// Unitless transport multiplier; 1.0 means local storage.
    pub distance_factor: f64,
    pub is_recommended: bool,
}

/// Aggregate view over the whole storage catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageOverview {
    pub total_capacity_mt: f64,
    pub region_count: usize,
    /// Regions by capacity, descending.
    pub top_regions: Vec<RegionCapacity>,
}

/// A region paired with its headline capacity for overview listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCapacity {
    pub region: RegionId,
    pub total_capacity_mt: f64,
}

// ---------------------------------------------------------------------------
// Utilization
// ---------------------------------------------------------------------------

/// Economic character of a utilization pathway.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EconomicsClass {
    RevenueGenerating,
    CostNeutral,
    CostPremium,
    HighValue,
}

impl EconomicsClass {
    /// Whether the pathway makes money rather than merely avoiding cost.
    /// Drives the utilization recommendation rule.
    #[must_use]
    pub const fn is_revenue_positive(self) -> bool {
        matches!(self, Self::RevenueGenerating | Self::HighValue)
    }
}

impl fmt::Display for EconomicsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RevenueGenerating => f.write_str("revenue generating"),
            Self::CostNeutral => f.write_str("cost neutral"),
            Self::CostPremium => f.write_str("cost premium"),
            Self::HighValue => f.write_str("high value"),
        }
    }
}

/// One ranked utilization pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationCandidate {
    pub pathway: PathwayId,
    pub description: String,
    pub utilizable_co2_tonnes: f64,
    pub efficiency_percent: f64,
    pub economics: EconomicsClass,
    pub capacity_factor: f64,
    pub is_recommended: bool,
}

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

/// Carbon-credit valuation under one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditValuation {
    /// The market actually used; may differ from the requested one when the
    /// request named an unknown market and the catalog default stepped in.
    pub market: MarketId,
    pub stored_co2_tonnes: f64,
    pub price_per_tonne: f64,
    /// Total value in the catalog's local currency.
    pub total_value: f64,
    /// Converted at the catalog's fixed reference rate; a stale-risk
    /// approximation, not a live quote.
    pub total_value_usd: f64,
    pub annual_revenue_potential: f64,
    /// ISO currency code of the local values, e.g. `INR`.
    pub currency: String,
}

// ---------------------------------------------------------------------------
// Policy alignment
// ---------------------------------------------------------------------------

/// Which incentive tiers a project's annual capture volume unlocks.
/// Tiers are additive: a project past the priority threshold holds all three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncentiveEligibility {
    pub carbon_credit_eligible: bool,
    pub subsidy_eligible: bool,
    pub priority_sector: bool,
    /// Estimated annual incentive value in local currency across all
    /// unlocked tiers.
    pub estimated_value: f64,
}

/// Alignment of a project against the national CCUS target schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAssessment {
    pub target_year: u16,
    pub national_target_capture_mt: f64,
    pub project_annual_capture_mt: f64,
    pub contribution_percent: f64,
    /// Capped linear scaling of the contribution, in [0, 100].
    pub alignment_score: f64,
    pub years_to_net_zero: u16,
    pub incentives: IncentiveEligibility,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// Which analysis a recommendation came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Capture,
    Storage,
    Utilization,
    Financial,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture => f.write_str("capture"),
            Self::Storage => f.write_str("storage"),
            Self::Utilization => f.write_str("utilization"),
            Self::Financial => f.write_str("financial"),
        }
    }
}

/// Urgency of a synthesized recommendation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
        }
    }
}

/// One prioritized, human-readable action item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
    pub action: String,
}

// ---------------------------------------------------------------------------
// Pipeline result
// ---------------------------------------------------------------------------

/// Output of the comprehensive pipeline. All four analyses are always
/// present on success; only the recommendation list may legitimately be
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub request: AnalysisRequest,
    pub capture: CaptureEstimate,
    pub storage_candidates: Vec<StorageCandidate>,
    pub utilization_candidates: Vec<UtilizationCandidate>,
    pub credit_valuation: CreditValuation,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn economics_class_round_trips_snake_case() {
        let json = serde_json::to_string(&EconomicsClass::RevenueGenerating).unwrap();
        assert_eq!(json, "\"revenue_generating\"");
        let back: EconomicsClass = serde_json::from_str("\"high_value\"").unwrap();
        assert_eq!(back, EconomicsClass::HighValue);
    }

    #[test]
    fn revenue_positive_split() {
        assert!(EconomicsClass::RevenueGenerating.is_revenue_positive());
        assert!(EconomicsClass::HighValue.is_revenue_positive());
        assert!(!EconomicsClass::CostNeutral.is_revenue_positive());
        assert!(!EconomicsClass::CostPremium.is_revenue_positive());
    }

    #[test]
    fn formation_kind_is_a_json_map_key() {
        let mut formations = BTreeMap::new();
        formations.insert(FormationKind::SalineAquifers, 9500.0);
        let json = serde_json::to_string(&formations).unwrap();
        assert_eq!(json, "{\"saline_aquifers\":9500.0}");
    }

    #[test]
    fn request_omits_absent_optionals() {
        let req = AnalysisRequest {
            industry: IndustryId::new("cement_industry"),
            annual_emissions_tonnes: 50_000.0,
            home_region: None,
            credit_market: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("home_region"), "got {json}");
        assert!(!json.contains("credit_market"), "got {json}");
    }
}
