//! Capture estimation.
//!
//! Splits an industry's annual emissions into the share capture technology
//! can remove and the share that keeps venting:
//!
//! ```text
//! capturable = emissions * efficiency
//! remaining  = emissions * (1 - efficiency)
//! ```
//!
//! Deterministic and side-effect free; the only failure modes are an
//! industry key the catalog does not carry and a non-positive volume.

use ccast_catalog::Catalog;
use ccast_error::{CcastError, Result};
use ccast_types::{CaptureEstimate, IndustryId};

use crate::ensure_positive;

/// Estimate capture potential for one industry and emissions volume.
///
/// # Errors
///
/// `UnknownIndustry` (carrying the supported-key list) when the industry is
/// absent from the catalog; `InvalidAmount` on non-positive emissions.
pub fn estimate(
    catalog: &Catalog,
    industry: &IndustryId,
    annual_emissions_tonnes: f64,
) -> Result<CaptureEstimate> {
    ensure_positive("annual_emissions_tonnes", annual_emissions_tonnes)?;

    let Some(profile) = catalog.industry(industry) else {
        return Err(CcastError::unknown_industry(
            industry.as_str(),
            catalog.supported_industries(),
        ));
    };

    let efficiency = profile.capture_efficiency;
    Ok(CaptureEstimate {
        industry: industry.clone(),
        annual_emissions_tonnes,
        efficiency_percent: efficiency * 100.0,
        capturable_co2_tonnes: annual_emissions_tonnes * efficiency,
        remaining_emissions_tonnes: annual_emissions_tonnes * (1.0 - efficiency),
        reduction_percent: efficiency * 100.0,
    })
}
