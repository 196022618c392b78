//! Reference catalogs for the CarbonCast engine.
//!
//! Every numeric constant the analysis pipeline consumes — capture
//! efficiencies, storage capacities, pathway economics, credit prices, the
//! national policy schedule, gamification thresholds — is versioned
//! reference data, not physics and not code. The engine receives a loaded
//! [`Catalog`] by reference and never reaches for embedded literals.
//!
//! Catalogs are JSON documents. They are parsed and validated once at
//! process start; a document that fails validation must abort startup, since
//! no partial-catalog execution path is defined. After load the catalog is
//! immutable and freely shareable across threads.
//!
//! [`Catalog::builtin`] parses the snapshot compiled into this crate
//! (`data/catalog.json`); deployments that maintain their own reference data
//! point [`Catalog::from_path`] at it instead.

mod validate;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use ccast_error::{CcastError, Result};
use ccast_types::{
    ActivityLedger, EconomicsClass, FormationKind, IndustryId, MarketId, PathwayId, RegionId,
};

pub use validate::CatalogViolation;

/// Schema version this crate reads and writes.
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

/// Default snapshot compiled into the crate.
const BUILTIN_SNAPSHOT: &str = include_str!("../data/catalog.json");

// ---------------------------------------------------------------------------
// Leaf tables
// ---------------------------------------------------------------------------

/// Capture characteristics of one industry class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryProfile {
    /// Fraction of emissions capture technology can remove, in (0, 1].
    pub capture_efficiency: f64,
    pub description: String,
}

/// Storage characteristics of one geological region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageRegion {
    /// Capacity per formation class, megatonnes.
    pub formations: BTreeMap<FormationKind, f64>,
    /// Headline capacity, megatonnes. Source surveys may quote more than the
    /// per-formation breakdown accounts for, so this is >= the sum, not
    /// necessarily equal to it.
    pub total_capacity_mt: f64,
    #[serde(default)]
    pub known_projects: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Conversion characteristics of one utilization pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayProfile {
    /// Fraction of fed CO2 the process binds, in (0, 1].
    pub efficiency: f64,
    /// Fraction of the captured stream the pathway can absorb, in (0, 1].
    pub capacity_factor: f64,
    pub economics: EconomicsClass,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Distance table
// ---------------------------------------------------------------------------

/// One surveyed region pair with its transport multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistancePair {
    pub a: RegionId,
    pub b: RegionId,
    pub factor: f64,
}

/// Sparse symmetric transport-cost table over region pairs.
///
/// Lookups try both orderings of the pair; pairs the survey never covered
/// fall back to `unknown_pair_factor`, and when the caller has no home
/// region at all every candidate gets `no_home_factor`. Neither miss is an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTable {
    pub pairs: Vec<DistancePair>,
    pub unknown_pair_factor: f64,
    pub no_home_factor: f64,
}

impl DistanceTable {
    /// Transport multiplier from `home` to `dest`.
    #[must_use]
    pub fn factor(&self, home: Option<&RegionId>, dest: &RegionId) -> f64 {
        let Some(home) = home else {
            return self.no_home_factor;
        };
        // The table is tens of entries at most; a scan beats an index here.
        self.pairs
            .iter()
            .find(|p| (&p.a == home && &p.b == dest) || (&p.a == dest && &p.b == home))
            .map_or(self.unknown_pair_factor, |p| p.factor)
    }
}

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

/// Credit markets and their per-tonne prices in local currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTable {
    pub prices: BTreeMap<MarketId, f64>,
    /// Substituted whenever a request omits the market or names one the
    /// table does not carry.
    pub default_market: MarketId,
}

impl MarketTable {
    /// Resolve a requested market to the one that will actually price the
    /// valuation, falling back to the default for unknown or absent keys.
    #[must_use]
    pub fn resolve(&self, requested: Option<&MarketId>) -> (MarketId, f64) {
        let market = requested
            .filter(|m| self.prices.contains_key(*m))
            .unwrap_or(&self.default_market)
            .clone();
        let price = self.prices.get(&market).copied().unwrap_or_default();
        (market, price)
    }
}

// ---------------------------------------------------------------------------
// Policy schedule
// ---------------------------------------------------------------------------

/// One national target milestone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyTarget {
    pub year: u16,
    pub capture_mt: f64,
    pub storage_mt: f64,
    pub utilization_mt: f64,
}

/// Per-tonne incentive tiers unlocked by annual capture volume. Tiers are
/// additive, not exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncentiveSchedule {
    pub credit_threshold_tonnes: f64,
    pub credit_rate_per_tonne: f64,
    pub subsidy_threshold_tonnes: f64,
    pub subsidy_rate_per_tonne: f64,
    pub priority_threshold_tonnes: f64,
    pub priority_rate_per_tonne: f64,
}

/// National CCUS mission schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySchedule {
    /// The year the schedule data was compiled for. Stands in for the wall
    /// clock everywhere the engine needs "now": default project start is
    /// `reference_year + 2`.
    pub reference_year: u16,
    pub net_zero_year: u16,
    /// Milestones in strictly increasing year order.
    pub targets: Vec<PolicyTarget>,
    pub incentives: IncentiveSchedule,
}

impl PolicySchedule {
    /// The milestone a project starting in `start_year` counts toward: the
    /// earliest scheduled year at or after the start, or the final milestone
    /// as a ceiling for starts beyond the schedule.
    ///
    /// # Panics
    ///
    /// Never panics on a validated catalog (`targets` is non-empty).
    #[must_use]
    pub fn target_for(&self, start_year: u16) -> &PolicyTarget {
        self.targets
            .iter()
            .find(|t| t.year >= start_year)
            .unwrap_or_else(|| {
                self.targets
                    .last()
                    .expect("validated catalog has at least one policy target")
            })
    }
}

// ---------------------------------------------------------------------------
// Gamification rules
// ---------------------------------------------------------------------------

/// Which ledger counter an achievement category reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerMetric {
    OffsetTonnes,
    ContentInteractions,
    ActionsTaken,
}

impl LedgerMetric {
    /// Read this metric's current value out of a ledger.
    #[must_use]
    pub fn read(self, ledger: &ActivityLedger) -> f64 {
        match self {
            Self::OffsetTonnes => ledger.co2_offset_tonnes,
            Self::ContentInteractions => ledger.content_interactions as f64,
            Self::ActionsTaken => ledger.actions_taken as f64,
        }
    }
}

/// One level band: the threshold a total score must stay below to remain in
/// the previous band, paired with the band's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBand {
    pub threshold: f64,
    pub name: String,
}

/// One achievement category with its ascending threshold ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementRule {
    pub category: String,
    pub title: String,
    pub metric: LedgerMetric,
    pub thresholds: Vec<f64>,
    /// Human unit for the description template, e.g. "tonnes of CO2 offset".
    pub unit: String,
}

/// Scoring rates, caps, levels, and achievement ladders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRules {
    pub offset_points_per_tonne: f64,
    pub offset_cap: f64,
    pub awareness_points_per_interaction: f64,
    pub awareness_cap: f64,
    pub action_points_per_action: f64,
    pub action_cap: f64,
    /// Bands in strictly increasing threshold order, starting at 0.
    pub levels: Vec<LevelBand>,
    /// Points assumed per further action when estimating milestones.
    pub points_per_action_estimate: f64,
    pub achievements: Vec<AchievementRule>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The full set of reference tables, loaded once and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub schema_version: u32,
    /// Free-form data vintage, e.g. `2024.1`.
    pub version: String,
    /// ISO code of the currency all local prices are quoted in.
    pub currency_code: String,
    /// Fixed reference conversion rate, local currency per USD. A stale-risk
    /// approximation; production deployments should refresh the catalog.
    pub fx_rate_usd: f64,
    pub industries: BTreeMap<IndustryId, IndustryProfile>,
    pub regions: BTreeMap<RegionId, StorageRegion>,
    pub distances: DistanceTable,
    pub pathways: BTreeMap<PathwayId, PathwayProfile>,
    pub markets: MarketTable,
    pub policy: PolicySchedule,
    pub engagement: EngagementRules,
}

impl Catalog {
    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CcastError::Json` on malformed JSON and
    /// `CcastError::Catalog` listing every violation when the document
    /// parses but fails validation.
    pub fn from_json_str(doc: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(doc)?;
        let violations = validate::validate(&catalog);
        if !violations.is_empty() {
            let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(CcastError::catalog(reasons.join("; ")));
        }
        info!(
            version = %catalog.version,
            industries = catalog.industries.len(),
            regions = catalog.regions.len(),
            pathways = catalog.pathways.len(),
            markets = catalog.markets.prices.len(),
            "reference catalog loaded"
        );
        Ok(catalog)
    }

    /// Load and validate a catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns `CcastError::Io` when the file cannot be read, plus the
    /// failure modes of [`Catalog::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let doc = std::fs::read_to_string(path)?;
        Self::from_json_str(&doc)
    }

    /// The snapshot compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the embedded snapshot is itself invalid, which
    /// the crate's tests rule out.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_SNAPSHOT)
    }

    /// Profile lookup for one industry key.
    #[must_use]
    pub fn industry(&self, id: &IndustryId) -> Option<&IndustryProfile> {
        self.industries.get(id)
    }

    /// Sorted list of every supported industry key, for error payloads and
    /// boundary listings.
    #[must_use]
    pub fn supported_industries(&self) -> Vec<String> {
        self.industries.keys().map(|k| k.0.clone()).collect()
    }

    /// Run validation against this catalog and return every violation found.
    /// Loaders call this internally; it is public so operators can lint a
    /// candidate document without loading it for serving.
    #[must_use]
    pub fn lint(&self) -> Vec<CatalogViolation> {
        validate::validate(self)
    }
}
