//! Carbon-credit valuation.
//!
//! Prices a stored CO2 volume under one credit market. An unknown or
//! unspecified market resolves to the catalog's default market — the
//! pipeline stays non-fatal on bad optional input, and the valuation
//! reports which market actually priced it. The USD figure uses the
//! catalog's fixed reference rate, a stale-risk approximation rather than a
//! live quote.

use tracing::debug;

use ccast_catalog::Catalog;
use ccast_error::Result;
use ccast_types::{CreditValuation, MarketId};

use crate::ensure_positive;

/// Value a stored CO2 volume under the requested (or default) market.
///
/// # Errors
///
/// `InvalidAmount` on a non-positive volume.
pub fn value(
    catalog: &Catalog,
    stored_co2_tonnes: f64,
    market: Option<&MarketId>,
) -> Result<CreditValuation> {
    ensure_positive("stored_co2_tonnes", stored_co2_tonnes)?;

    let (resolved, price_per_tonne) = catalog.markets.resolve(market);
    if let Some(requested) = market {
        if *requested != resolved {
            debug!(
                requested = %requested,
                used = %resolved,
                "unknown credit market, using catalog default"
            );
        }
    }

    let total_value = stored_co2_tonnes * price_per_tonne;
    Ok(CreditValuation {
        market: resolved,
        stored_co2_tonnes,
        price_per_tonne,
        total_value,
        total_value_usd: total_value / catalog.fx_rate_usd,
        annual_revenue_potential: total_value,
        currency: catalog.currency_code.clone(),
    })
}
