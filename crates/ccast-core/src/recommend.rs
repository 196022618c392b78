//! Recommendation synthesis.
//!
//! A fixed-order decision table over the four analysis outputs. Each rule is
//! independent and contributes zero or one item; an unremarkable analysis
//! may legitimately synthesize nothing. The table is deliberately not
//! data-driven: four rules in source order beat a rules engine at this size.

use ccast_types::{
    CaptureEstimate, CreditValuation, Priority, Recommendation, RecommendationKind,
    StorageCandidate, UtilizationCandidate,
};

/// Capture efficiency (percent) at or above which implementation is urged
/// outright rather than paired with upgrade advice.
const STRONG_CAPTURE_PERCENT: f64 = 85.0;

/// Annual revenue (local currency) above which the financial case is called
/// out, regardless of the market that produced it.
const FINANCIAL_CASE_FLOOR: f64 = 1_000_000.0;

/// Synthesize prioritized action items from the four analysis outputs.
#[must_use]
pub fn synthesize(
    capture: &CaptureEstimate,
    storage: &[StorageCandidate],
    utilization: &[UtilizationCandidate],
    credits: &CreditValuation,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    capture_advice(capture, &mut out);
    storage_advice(storage, &mut out);
    utilization_advice(utilization, &mut out);
    financial_advice(credits, &mut out);
    out
}

fn capture_advice(capture: &CaptureEstimate, out: &mut Vec<Recommendation>) {
    if capture.efficiency_percent >= STRONG_CAPTURE_PERCENT {
        out.push(Recommendation {
            kind: RecommendationKind::Capture,
            priority: Priority::High,
            message: format!(
                "Excellent capture potential! You can capture {:.1}% of emissions.",
                capture.efficiency_percent
            ),
            action: "Proceed with CCUS implementation planning".to_owned(),
        });
    } else {
        out.push(Recommendation {
            kind: RecommendationKind::Capture,
            priority: Priority::Medium,
            message: format!(
                "Moderate capture efficiency of {:.1}%. Consider technology upgrades.",
                capture.efficiency_percent
            ),
            action: "Evaluate advanced capture technologies".to_owned(),
        });
    }
}

fn storage_advice(storage: &[StorageCandidate], out: &mut Vec<Recommendation>) {
    if let Some(best) = storage.iter().find(|c| c.is_recommended) {
        out.push(Recommendation {
            kind: RecommendationKind::Storage,
            priority: Priority::High,
            message: format!("Suitable storage sites available in {}", best.region),
            action: format!(
                "Explore partnerships with storage facilities in {}",
                best.region
            ),
        });
    }
}

fn utilization_advice(utilization: &[UtilizationCandidate], out: &mut Vec<Recommendation>) {
    // The filtered list keeps the utilizable-volume order of the input; it
    // is not re-sorted by economics class.
    if let Some(best) = utilization
        .iter()
        .find(|c| c.economics.is_revenue_positive())
    {
        out.push(Recommendation {
            kind: RecommendationKind::Utilization,
            priority: Priority::High,
            message: format!("Consider {} - {}", best.pathway, best.economics),
            action: format!("Evaluate {}", best.description.to_lowercase()),
        });
    }
}

fn financial_advice(credits: &CreditValuation, out: &mut Vec<Recommendation>) {
    if credits.annual_revenue_potential > FINANCIAL_CASE_FLOOR {
        out.push(Recommendation {
            kind: RecommendationKind::Financial,
            priority: Priority::High,
            message: format!(
                "Strong financial case with {:.0} {} in annual carbon credit potential",
                credits.annual_revenue_potential, credits.currency
            ),
            action: "Develop detailed financial model and seek funding".to_owned(),
        });
    }
}
