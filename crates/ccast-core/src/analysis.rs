//! The comprehensive analysis pipeline.
//!
//! Stage order: capture estimation runs first and fails fast when the
//! industry is unknown; its capturable output is the CO2 volume for storage
//! ranking, utilization ranking, and credit valuation, which have no data
//! dependency on each other; recommendation synthesis consumes all four.
//! Nothing is mutated along the way, so a failed request leaves no state to
//! roll back.

use tracing::debug;

use ccast_catalog::Catalog;
use ccast_error::Result;
use ccast_types::{AnalysisRequest, AnalysisResult};

use crate::{capture, credits, recommend, storage, utilization};

/// Run the full pipeline for one request.
///
/// # Errors
///
/// `UnknownIndustry` or `InvalidAmount` from the capture stage; the
/// downstream stages cannot fail on a capture output (the capturable volume
/// of a valid request is always positive).
pub fn run(catalog: &Catalog, request: &AnalysisRequest) -> Result<AnalysisResult> {
    let capture = capture::estimate(
        catalog,
        &request.industry,
        request.annual_emissions_tonnes,
    )?;
    debug!(
        industry = %capture.industry,
        capturable = capture.capturable_co2_tonnes,
        "capture stage complete"
    );

    let storage_candidates = storage::rank(
        catalog,
        capture.capturable_co2_tonnes,
        request.home_region.as_ref(),
    )?;
    let utilization_candidates =
        utilization::rank(catalog, capture.capturable_co2_tonnes)?;
    let credit_valuation = credits::value(
        catalog,
        capture.capturable_co2_tonnes,
        request.credit_market.as_ref(),
    )?;
    debug!(
        storage_candidates = storage_candidates.len(),
        utilization_candidates = utilization_candidates.len(),
        market = %credit_valuation.market,
        "analysis stages complete"
    );

    let recommendations = recommend::synthesize(
        &capture,
        &storage_candidates,
        &utilization_candidates,
        &credit_valuation,
    );

    Ok(AnalysisResult {
        request: request.clone(),
        capture,
        storage_candidates,
        utilization_candidates,
        credit_valuation,
        recommendations,
    })
}
