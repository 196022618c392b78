//! Policy-alignment scoring.
//!
//! Maps a project's annual capture volume onto the nearest future national
//! target milestone and reports how much of that milestone the project
//! covers. The alignment score is a capped linear scaling of the
//! contribution — a planning signal, not a probability:
//!
//! ```text
//! contribution = (tonnes / 1e6) / target_capture_mt * 100
//! score        = min(100, contribution * 10)
//! ```
//!
//! Incentive tiers are cumulative: each threshold crossed adds its per-tonne
//! rate on the full volume, so a project past the priority threshold accrues
//! all three bonuses.

use ccast_catalog::Catalog;
use ccast_error::{CcastError, Result};
use ccast_types::{IncentiveEligibility, PolicyAssessment};

/// Contribution (percent) above which a project is called out as a
/// significant contributor.
const SIGNIFICANT_CONTRIBUTION_PERCENT: f64 = 0.01;

/// Contribution (percent) above which scaling-up advice is added.
const HIGH_IMPACT_CONTRIBUTION_PERCENT: f64 = 0.1;

/// Years of lead time assumed when the caller gives no start year.
const DEFAULT_LEAD_TIME_YEARS: u16 = 2;

/// Assess a project's alignment with the national target schedule.
///
/// `project_start_year` defaults to the catalog's reference year plus the
/// standard lead time.
///
/// # Errors
///
/// `InvalidAmount` when the capture volume is negative or non-finite (zero
/// is a legal, if unambitious, project).
pub fn assess(
    catalog: &Catalog,
    annual_capture_potential_tonnes: f64,
    project_start_year: Option<u16>,
) -> Result<PolicyAssessment> {
    if !annual_capture_potential_tonnes.is_finite() || annual_capture_potential_tonnes < 0.0 {
        return Err(CcastError::invalid_amount(
            "annual_capture_potential_tonnes",
            annual_capture_potential_tonnes,
        ));
    }

    let policy = &catalog.policy;
    let start_year =
        project_start_year.unwrap_or(policy.reference_year + DEFAULT_LEAD_TIME_YEARS);
    let target = policy.target_for(start_year);

    let project_annual_capture_mt = annual_capture_potential_tonnes / 1e6;
    let contribution_percent = project_annual_capture_mt / target.capture_mt * 100.0;
    let alignment_score = (contribution_percent * 10.0).min(100.0);

    let incentives = incentive_eligibility(catalog, annual_capture_potential_tonnes);
    let recommendations = policy_recommendations(contribution_percent, target.year);

    Ok(PolicyAssessment {
        target_year: target.year,
        national_target_capture_mt: target.capture_mt,
        project_annual_capture_mt,
        contribution_percent,
        alignment_score,
        years_to_net_zero: policy.net_zero_year - policy.reference_year,
        incentives,
        recommendations,
    })
}

/// Which incentive tiers the volume unlocks and what they are worth per
/// year, all tiers combined.
fn incentive_eligibility(catalog: &Catalog, annual_capture: f64) -> IncentiveEligibility {
    let schedule = &catalog.policy.incentives;
    let carbon_credit_eligible = annual_capture > schedule.credit_threshold_tonnes;
    let subsidy_eligible = annual_capture > schedule.subsidy_threshold_tonnes;
    let priority_sector = annual_capture > schedule.priority_threshold_tonnes;

    let mut estimated_value = 0.0;
    if carbon_credit_eligible {
        estimated_value += annual_capture * schedule.credit_rate_per_tonne;
    }
    if subsidy_eligible {
        estimated_value += annual_capture * schedule.subsidy_rate_per_tonne;
    }
    if priority_sector {
        estimated_value += annual_capture * schedule.priority_rate_per_tonne;
    }

    IncentiveEligibility {
        carbon_credit_eligible,
        subsidy_eligible,
        priority_sector,
        estimated_value,
    }
}

/// Templated advice gated on the contribution level, with the registry and
/// timeline boilerplate always appended.
fn policy_recommendations(contribution_percent: f64, target_year: u16) -> Vec<String> {
    let mut out = Vec::new();

    if contribution_percent > SIGNIFICANT_CONTRIBUTION_PERCENT {
        out.push(format!(
            "Your project significantly contributes to the {target_year} national CCUS targets"
        ));
        out.push("Apply for government CCUS mission funding and support".to_owned());
    }
    if contribution_percent > HIGH_IMPACT_CONTRIBUTION_PERCENT {
        out.push(
            "Consider scaling up - your project has high national impact potential".to_owned(),
        );
        out.push(
            "Explore partnerships with national planning and environment agencies".to_owned(),
        );
    }

    out.push("Register with the national carbon registry for credit certification".to_owned());
    out.push("Align the project timeline with national CCUS mission milestones".to_owned());

    out
}
