//! Engagement scoring.
//!
//! Ranks a user's cumulative climate activity with the same capped-score and
//! threshold-ladder idiom as the analysis side: each ledger counter earns
//! points at a catalog rate up to a cap, the total places the user on the
//! level ladder, and every achievement rung at or below the relevant counter
//! is held simultaneously (rungs are cumulative, not exclusive).
//!
//! The ledger arrives whole from an external activity tracker on every call;
//! this module neither fetches nor stores it.

use ccast_catalog::{Catalog, EngagementRules, LevelBand};
use ccast_error::{CcastError, Result};
use ccast_types::{
    Achievement, ActivityLedger, EngagementReport, EngagementScores, LevelInfo, Milestone,
};

/// Score a ledger against the catalog's engagement rules.
///
/// # Errors
///
/// `InvalidAmount` when the offset figure is negative or non-finite; the
/// event counters are unsigned by construction.
pub fn score(catalog: &Catalog, ledger: &ActivityLedger) -> Result<EngagementReport> {
    if !ledger.co2_offset_tonnes.is_finite() || ledger.co2_offset_tonnes < 0.0 {
        return Err(CcastError::invalid_amount(
            "co2_offset_tonnes",
            ledger.co2_offset_tonnes,
        ));
    }

    let rules = &catalog.engagement;
    let carbon_offset =
        (ledger.co2_offset_tonnes * rules.offset_points_per_tonne).min(rules.offset_cap);
    let awareness = (ledger.content_interactions as f64
        * rules.awareness_points_per_interaction)
        .min(rules.awareness_cap);
    let action =
        (ledger.actions_taken as f64 * rules.action_points_per_action).min(rules.action_cap);
    let total = carbon_offset + awareness + action;

    Ok(EngagementReport {
        scores: EngagementScores {
            carbon_offset,
            awareness,
            action,
            total,
        },
        level: resolve_level(&rules.levels, total),
        achievements: unlocked_achievements(rules, ledger),
        next_milestone: next_milestone(rules, total),
    })
}

/// Walk the ladder for the first band the total is strictly below; a total
/// at or past the last threshold holds the top level.
fn resolve_level(levels: &[LevelBand], total: f64) -> LevelInfo {
    for (idx, band) in levels.iter().enumerate() {
        if total < band.threshold {
            // idx >= 1 always: the ladder starts at threshold 0 and the
            // total is non-negative.
            let level = idx.max(1) as u32;
            let name = levels[idx.saturating_sub(1)].name.clone();
            let progress_to_next = if band.threshold > 0.0 {
                total / band.threshold
            } else {
                1.0
            };
            return LevelInfo {
                level,
                name,
                current_score: total,
                threshold: band.threshold,
                progress_to_next,
            };
        }
    }

    let top = levels
        .last()
        .expect("validated catalog has a non-empty level ladder");
    LevelInfo {
        level: levels.len() as u32,
        name: top.name.clone(),
        current_score: total,
        threshold: top.threshold,
        progress_to_next: 1.0,
    }
}

/// Every rung of every category the ledger has reached.
fn unlocked_achievements(rules: &EngagementRules, ledger: &ActivityLedger) -> Vec<Achievement> {
    let mut out = Vec::new();
    for rule in &rules.achievements {
        let value = rule.metric.read(ledger);
        for (idx, threshold) in rule.thresholds.iter().enumerate() {
            if value >= *threshold {
                let tier = (idx + 1) as u32;
                out.push(Achievement {
                    category: rule.category.clone(),
                    tier,
                    title: format!("{} Level {tier}", rule.title),
                    description: format!("Reached {threshold}+ {}", rule.unit),
                });
            }
        }
    }
    out
}

/// The first level threshold strictly ahead of the total, or the terminal
/// record once the ladder is complete.
fn next_milestone(rules: &EngagementRules, total: f64) -> Milestone {
    for band in &rules.levels {
        if total < band.threshold {
            let points_needed = band.threshold - total;
            return Milestone {
                target_score: band.threshold,
                points_needed,
                estimated_actions: (points_needed / rules.points_per_action_estimate).ceil()
                    as u64,
                message: None,
            };
        }
    }

    let top = rules
        .levels
        .last()
        .expect("validated catalog has a non-empty level ladder");
    Milestone {
        target_score: top.threshold,
        points_needed: 0.0,
        estimated_actions: 0,
        message: Some("Congratulations! You have reached the highest level!".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn ledger(offset: f64, interactions: u64, actions: u64) -> ActivityLedger {
        ActivityLedger {
            co2_offset_tonnes: offset,
            content_interactions: interactions,
            actions_taken: actions,
        }
    }

    #[test]
    fn offset_score_caps_at_one_thousand() {
        // 150 tonnes * 10 points = 1500, clamped to the 1000-point cap.
        let report = score(&catalog(), &ledger(150.0, 0, 0)).unwrap();
        assert_eq!(report.scores.carbon_offset, 1_000.0);
        assert_eq!(report.scores.total, 1_000.0);
    }

    #[test]
    fn sub_scores_cap_independently_and_total_never_exceeds_2000() {
        let report = score(&catalog(), &ledger(1e9, u64::MAX, u64::MAX)).unwrap();
        assert_eq!(report.scores.carbon_offset, 1_000.0);
        assert_eq!(report.scores.awareness, 500.0);
        assert_eq!(report.scores.action, 500.0);
        assert_eq!(report.scores.total, 2_000.0);
    }

    #[test]
    fn fresh_ledger_is_a_beginner() {
        let report = score(&catalog(), &ledger(0.0, 0, 0)).unwrap();
        assert_eq!(report.level.level, 1);
        assert_eq!(report.level.name, "Beginner");
        assert_eq!(report.level.threshold, 100.0);
        assert_eq!(report.level.progress_to_next, 0.0);
        assert!(report.achievements.is_empty());
    }

    #[test]
    fn level_walk_matches_the_ladder() {
        let catalog = catalog();
        // 15 tonnes -> 150 points -> strictly below 300, so level 2 "Aware".
        let report = score(&catalog, &ledger(15.0, 0, 0)).unwrap();
        assert_eq!(report.level.level, 2);
        assert_eq!(report.level.name, "Aware");
        assert_eq!(report.level.progress_to_next, 150.0 / 300.0);

        // Capped offset alone (1000) sits strictly below 1500: "Champion".
        let report = score(&catalog, &ledger(150.0, 0, 0)).unwrap();
        assert_eq!(report.level.level, 5);
        assert_eq!(report.level.name, "Champion");
    }

    #[test]
    fn maxed_ledger_tops_the_ladder() {
        let report = score(&catalog(), &ledger(1e6, 10_000, 10_000)).unwrap();
        assert_eq!(report.level.level, 7);
        assert_eq!(report.level.name, "Master");
        assert_eq!(report.level.progress_to_next, 1.0);
        assert_eq!(report.next_milestone.points_needed, 0.0);
        assert_eq!(report.next_milestone.estimated_actions, 0);
        assert!(report.next_milestone.message.is_some());
    }

    #[test]
    fn achievement_rungs_are_cumulative() {
        let report = score(&catalog(), &ledger(600.0, 0, 0)).unwrap();
        let capturer: Vec<&Achievement> = report
            .achievements
            .iter()
            .filter(|a| a.category == "carbon_capturer")
            .collect();
        // 600 tonnes clears the 100 and 500 rungs but not 1000.
        assert_eq!(capturer.len(), 2);
        assert_eq!(capturer[0].tier, 1);
        assert_eq!(capturer[1].tier, 2);
        assert_eq!(capturer[1].title, "Carbon Capturer Level 2");
        assert_eq!(capturer[1].description, "Reached 500+ tonnes of CO2 offset");
    }

    #[test]
    fn achievements_read_their_own_counters() {
        let report = score(&catalog(), &ledger(0.0, 60, 7)).unwrap();
        let categories: Vec<&str> = report
            .achievements
            .iter()
            .map(|a| a.category.as_str())
            .collect();
        // 60 interactions: ambassador rungs 10 and 50. 7 actions: advocate
        // rungs 1 and 5. No offset, no capturer rungs.
        assert!(!categories.contains(&"carbon_capturer"));
        assert_eq!(
            categories
                .iter()
                .filter(|c| **c == "awareness_ambassador")
                .count(),
            2
        );
        assert_eq!(
            categories.iter().filter(|c| **c == "policy_advocate").count(),
            2
        );
    }

    #[test]
    fn milestone_estimates_actions_to_close_the_gap() {
        // 150 points: next band is 300, gap 150, at 25 points/action -> 6.
        let report = score(&catalog(), &ledger(15.0, 0, 0)).unwrap();
        assert_eq!(report.next_milestone.target_score, 300.0);
        assert_eq!(report.next_milestone.points_needed, 150.0);
        assert_eq!(report.next_milestone.estimated_actions, 6);
        assert!(report.next_milestone.message.is_none());
    }

    #[test]
    fn negative_offset_rejected() {
        assert!(score(&catalog(), &ledger(-1.0, 0, 0)).is_err());
    }
}
