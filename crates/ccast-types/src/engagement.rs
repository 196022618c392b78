//! Shapes for the gamification scoring engine.
//!
//! The ledger is assembled by an external activity tracker and passed in
//! whole on every scoring call; this crate never owns its storage.

use serde::{Deserialize, Serialize};

/// Per-user running tally of climate-relevant activity.
///
/// Counters only accumulate (append-only at the tracker); the two event
/// counters are unsigned by construction, and the engine rejects a negative
/// offset figure defensively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ActivityLedger {
    pub co2_offset_tonnes: f64,
    pub content_interactions: u64,
    pub actions_taken: u64,
}

/// The three capped sub-scores and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementScores {
    pub carbon_offset: f64,
    pub awareness: f64,
    pub action: f64,
    /// Sum of the three sub-scores; at most 2000 under the default rules.
    pub total: f64,
}

/// Resolved level for a total score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// 1-based level number; the top of the ladder is the number of bands.
    pub level: u32,
    pub name: String,
    pub current_score: f64,
    /// The threshold bounding this level from above (the last band's own
    /// threshold once the ladder is topped out).
    pub threshold: f64,
    /// Fraction of the bounding threshold already earned; 1.0 at the top.
    pub progress_to_next: f64,
}

/// One unlocked achievement rung. Rungs are cumulative: a user past the
/// third threshold of a category holds three records for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub category: String,
    /// 1-based rung within the category's threshold ladder.
    pub tier: u32,
    pub title: String,
    pub description: String,
}

/// The next level threshold ahead of the user, or the terminal record once
/// the ladder is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub target_score: f64,
    pub points_needed: f64,
    /// Rough count of further actions to close the gap, at the catalog's
    /// points-per-action estimate.
    pub estimated_actions: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Full gamification report for one ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementReport {
    pub scores: EngagementScores,
    pub level: LevelInfo,
    pub achievements: Vec<Achievement>,
    pub next_milestone: Milestone,
}
