//! Storage-site ranking.
//!
//! Greedy nearest-feasible ranking over the regional storage catalog: a
//! candidate must have capacity headroom for the full volume, and closer
//! (then bigger) wins. The ranker never considers multi-region allocation
//! or partial fills; that is the intended shape of the answer, not a gap.
//!
//! A caller-supplied home region that exists in the catalog is always the
//! first candidate at `distance_factor` 1.0, with no capacity check: local
//! storage stays on the table even when the region alone cannot hold the
//! stream.

use ccast_catalog::Catalog;
use ccast_error::Result;
use ccast_types::{RegionCapacity, RegionId, StorageCandidate, StorageOverview};

use crate::ensure_positive;

/// Candidates at or past this transport multiplier are listed but not
/// recommended.
const RECOMMENDED_FACTOR_CEILING: f64 = 2.0;

/// Tonnes of CO2 per megatonne of capacity headroom required of a
/// non-local candidate.
const HEADROOM_TONNES_PER_MT: f64 = 1000.0;

/// Rank storage destinations for a CO2 volume.
///
/// # Errors
///
/// `InvalidAmount` on a non-positive volume.
pub fn rank(
    catalog: &Catalog,
    co2_amount_tonnes: f64,
    home_region: Option<&RegionId>,
) -> Result<Vec<StorageCandidate>> {
    ensure_positive("co2_amount_tonnes", co2_amount_tonnes)?;

    // A home region the catalog does not know is never pinned, but it still
    // serves as the origin for distance lookups.
    let home = home_region.filter(|r| catalog.regions.contains_key(*r));

    let mut ranked: Vec<StorageCandidate> = catalog
        .regions
        .iter()
        .filter(|(id, _)| Some(*id) != home)
        .filter(|(_, region)| {
            region.total_capacity_mt > co2_amount_tonnes / HEADROOM_TONNES_PER_MT
        })
        .map(|(id, region)| {
            let distance_factor = catalog.distances.factor(home_region, id);
            StorageCandidate {
                region: id.clone(),
                total_capacity_mt: region.total_capacity_mt,
                formations: region.formations.clone(),
                known_projects: region.known_projects.clone(),
                description: region.description.clone(),
                distance_factor,
                is_recommended: distance_factor < RECOMMENDED_FACTOR_CEILING,
            }
        })
        .collect();

    // Closer wins, then bigger, then the region key so equal entries cannot
    // reorder between runs or catalog serializations.
    ranked.sort_by(|a, b| {
        a.distance_factor
            .total_cmp(&b.distance_factor)
            .then(b.total_capacity_mt.total_cmp(&a.total_capacity_mt))
            .then_with(|| a.region.cmp(&b.region))
    });

    if let Some(home_id) = home {
        let region = &catalog.regions[home_id];
        ranked.insert(
            0,
            StorageCandidate {
                region: home_id.clone(),
                total_capacity_mt: region.total_capacity_mt,
                formations: region.formations.clone(),
                known_projects: region.known_projects.clone(),
                description: region.description.clone(),
                distance_factor: 1.0,
                is_recommended: true,
            },
        );
    }

    Ok(ranked)
}

/// Aggregate view of the storage catalog: national total and the largest
/// regions by capacity.
#[must_use]
pub fn overview(catalog: &Catalog, top_n: usize) -> StorageOverview {
    let total_capacity_mt: f64 = catalog
        .regions
        .values()
        .map(|r| r.total_capacity_mt)
        .sum();

    let mut top_regions: Vec<RegionCapacity> = catalog
        .regions
        .iter()
        .map(|(id, region)| RegionCapacity {
            region: id.clone(),
            total_capacity_mt: region.total_capacity_mt,
        })
        .collect();
    top_regions.sort_by(|a, b| {
        b.total_capacity_mt
            .total_cmp(&a.total_capacity_mt)
            .then_with(|| a.region.cmp(&b.region))
    });
    top_regions.truncate(top_n);

    StorageOverview {
        total_capacity_mt,
        region_count: catalog.regions.len(),
        top_regions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn home_region_pinned_first_at_unit_distance() {
        let gujarat = RegionId::new("Gujarat");
        let ranked = rank(&catalog(), 45_000.0, Some(&gujarat)).unwrap();
        assert_eq!(ranked[0].region, gujarat);
        assert_eq!(ranked[0].distance_factor, 1.0);
        assert!(ranked[0].is_recommended);
        // Gujarat appears exactly once.
        assert_eq!(ranked.iter().filter(|c| c.region == gujarat).count(), 1);
    }

    #[test]
    fn surveyed_neighbors_outrank_fallback_regions() {
        let gujarat = RegionId::new("Gujarat");
        let ranked = rank(&catalog(), 45_000.0, Some(&gujarat)).unwrap();
        // Rajasthan (1.2) and Maharashtra (1.5) are the surveyed neighbors.
        assert_eq!(ranked[1].region, RegionId::new("Rajasthan"));
        assert_eq!(ranked[1].distance_factor, 1.2);
        assert!(ranked[1].is_recommended);
        assert_eq!(ranked[2].region, RegionId::new("Maharashtra"));
        // Everything else sits at the unknown-pair fallback and is not
        // recommended.
        for candidate in &ranked[3..] {
            assert_eq!(candidate.distance_factor, 2.0);
            assert!(!candidate.is_recommended);
        }
    }

    #[test]
    fn fallback_ties_break_by_capacity_then_name() {
        let gujarat = RegionId::new("Gujarat");
        let ranked = rank(&catalog(), 45_000.0, Some(&gujarat)).unwrap();
        let fallback: Vec<f64> = ranked[3..]
            .iter()
            .map(|c| c.total_capacity_mt)
            .collect();
        let mut sorted = fallback.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(fallback, sorted, "equal-distance candidates sort by capacity");
    }

    #[test]
    fn no_home_region_uses_moderate_default_everywhere() {
        let ranked = rank(&catalog(), 45_000.0, None).unwrap();
        assert!(!ranked.is_empty());
        for candidate in &ranked {
            assert_eq!(candidate.distance_factor, 1.5);
            assert!(candidate.is_recommended);
        }
    }

    #[test]
    fn unknown_home_region_is_not_pinned() {
        let atlantis = RegionId::new("Atlantis");
        let ranked = rank(&catalog(), 45_000.0, Some(&atlantis)).unwrap();
        assert!(ranked.iter().all(|c| c.region != atlantis));
        // Unknown origin misses every surveyed pair, so everything falls
        // back to the unknown-pair factor.
        for candidate in &ranked {
            assert_eq!(candidate.distance_factor, 2.0);
            assert!(!candidate.is_recommended);
        }
    }

    #[test]
    fn capacity_headroom_filters_small_regions() {
        // 3.5 MT of CO2: only regions with more than 3500 MT of headline
        // capacity qualify; Karnataka (2900) and Tamil Nadu (3100) drop out.
        let ranked = rank(&catalog(), 3_500_000.0, None).unwrap();
        assert!(ranked.iter().all(|c| c.region != RegionId::new("Karnataka")));
        assert!(ranked.iter().all(|c| c.region != RegionId::new("Tamil Nadu")));
        assert!(ranked.iter().any(|c| c.region == RegionId::new("Gujarat")));
    }

    #[test]
    fn home_region_skips_the_capacity_check() {
        // A volume too large for Karnataka's headroom still pins it when it
        // is the caller's home region.
        let karnataka = RegionId::new("Karnataka");
        let ranked = rank(&catalog(), 3_500_000.0, Some(&karnataka)).unwrap();
        assert_eq!(ranked[0].region, karnataka);
        assert_eq!(ranked[0].distance_factor, 1.0);
        assert!(ranked[0].is_recommended);
    }

    #[test]
    fn candidates_carry_formation_breakdown() {
        let gujarat = RegionId::new("Gujarat");
        let ranked = rank(&catalog(), 45_000.0, Some(&gujarat)).unwrap();
        let formation_sum: f64 = ranked[0].formations.values().sum();
        assert_eq!(formation_sum, 12_850.0);
        assert!(!ranked[0].known_projects.is_empty());
    }

    #[test]
    fn overview_totals_and_orders_regions() {
        let overview = overview(&catalog(), 5);
        assert_eq!(overview.region_count, 12);
        assert_eq!(overview.top_regions.len(), 5);
        assert_eq!(overview.top_regions[0].region, RegionId::new("Gujarat"));
        assert_eq!(overview.top_regions[1].region, RegionId::new("Rajasthan"));
        let sum: f64 = Catalog::builtin()
            .unwrap()
            .regions
            .values()
            .map(|r| r.total_capacity_mt)
            .sum();
        assert_eq!(overview.total_capacity_mt, sum);
    }

    #[test]
    fn non_positive_volume_rejected() {
        assert!(rank(&catalog(), 0.0, None).is_err());
        assert!(rank(&catalog(), -1.0, None).is_err());
    }
}
