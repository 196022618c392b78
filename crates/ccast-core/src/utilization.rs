//! Utilization-pathway ranking.
//!
//! Every cataloged pathway is scored — there is no pre-filtering — and the
//! exploitable volume is the product of the input stream with the pathway's
//! conversion efficiency and capacity factor:
//!
//! ```text
//! utilizable = co2 * efficiency * capacity_factor
//! ```
//!
//! Because the score is linear in the input volume, scaling the stream
//! rescales every candidate identically and never reorders the list.

use ccast_catalog::Catalog;
use ccast_error::Result;
use ccast_types::UtilizationCandidate;

use crate::ensure_positive;

/// A pathway is flagged recommended when it can take most of the stream and
/// binds most of what it takes.
const RECOMMENDED_CAPACITY_FACTOR_FLOOR: f64 = 0.7;
const RECOMMENDED_EFFICIENCY_FLOOR: f64 = 0.75;

/// Rank utilization pathways for a CO2 volume, largest exploitable volume
/// first.
///
/// # Errors
///
/// `InvalidAmount` on a non-positive volume.
pub fn rank(catalog: &Catalog, co2_amount_tonnes: f64) -> Result<Vec<UtilizationCandidate>> {
    ensure_positive("co2_amount_tonnes", co2_amount_tonnes)?;

    let mut ranked: Vec<UtilizationCandidate> = catalog
        .pathways
        .iter()
        .map(|(id, pathway)| UtilizationCandidate {
            pathway: id.clone(),
            description: pathway.description.clone(),
            utilizable_co2_tonnes: co2_amount_tonnes
                * pathway.efficiency
                * pathway.capacity_factor,
            efficiency_percent: pathway.efficiency * 100.0,
            economics: pathway.economics,
            capacity_factor: pathway.capacity_factor,
            is_recommended: pathway.capacity_factor > RECOMMENDED_CAPACITY_FACTOR_FLOOR
                && pathway.efficiency > RECOMMENDED_EFFICIENCY_FLOOR,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.utilizable_co2_tonnes
            .total_cmp(&a.utilizable_co2_tonnes)
            .then_with(|| a.pathway.cmp(&b.pathway))
    });

    Ok(ranked)
}
