//! Core type definitions for CarbonCast.
//!
//! This crate is the vocabulary shared by the catalog, the analysis engine,
//! and any boundary in front of them: typed catalog keys, request/result
//! structs for every pipeline stage, and the gamification shapes. All public
//! types serialize to plain JSON; none perform I/O or hold references into
//! the catalog.

pub mod analysis;
pub mod engagement;
pub mod ids;

pub use analysis::{
    AnalysisRequest, AnalysisResult, CaptureEstimate, CreditValuation, EconomicsClass,
    FormationKind, IncentiveEligibility, PolicyAssessment, Priority, Recommendation,
    RecommendationKind, RegionCapacity, StorageCandidate, StorageOverview,
    UtilizationCandidate,
};
pub use engagement::{
    Achievement, ActivityLedger, EngagementReport, EngagementScores, LevelInfo, Milestone,
};
pub use ids::{IndustryId, MarketId, PathwayId, RegionId};
