//! Error taxonomy for the CarbonCast analysis engine.
//!
//! Every fallible operation in the workspace returns [`Result`]. The taxonomy
//! is deliberately small: analysis errors are local, pure-data failures with
//! no partial side effects to roll back, so a variant either describes a bad
//! request (`UnknownIndustry`, `InvalidAmount`) or a startup-fatal catalog
//! problem (`Catalog`, `Io`, `Json`).
//!
//! Two degradations are intentionally **not** errors and never appear here:
//! an unknown credit market silently resolves to the catalog's default
//! market, and a missing distance-factor pair falls back to a constant.

use std::io;

/// Convenience alias used across all CarbonCast crates.
pub type Result<T> = std::result::Result<T, CcastError>;

/// The workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum CcastError {
    /// Capture estimation was asked about an industry the catalog does not
    /// know. Carries the sorted supported-key list so boundaries can surface
    /// it to the caller, which is required behavior, not a courtesy.
    #[error("unknown industry `{industry}` ({} supported)", .supported.len())]
    UnknownIndustry {
        industry: String,
        supported: Vec<String>,
    },

    /// A non-positive emissions or CO2 volume reached the engine. Boundaries
    /// validate first; the engine still rejects to avoid emitting negative
    /// capturable tonnage.
    #[error("invalid {what}: {value} (must be positive)")]
    InvalidAmount { what: &'static str, value: f64 },

    /// The reference catalog failed validation at load time. Fatal to the
    /// process: no request may be served against a partial catalog.
    #[error("catalog rejected: {reason}")]
    Catalog { reason: String },

    /// Catalog file could not be read.
    #[error("catalog io: {0}")]
    Io(#[from] io::Error),

    /// Catalog document could not be parsed.
    #[error("catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

impl CcastError {
    /// Build an `UnknownIndustry` error from the offending key and the
    /// catalog's supported set.
    #[must_use]
    pub fn unknown_industry(
        industry: impl Into<String>,
        supported: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::UnknownIndustry {
            industry: industry.into(),
            supported: supported.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an `InvalidAmount` error for the named quantity.
    #[must_use]
    pub const fn invalid_amount(what: &'static str, value: f64) -> Self {
        Self::InvalidAmount { what, value }
    }

    /// Build a `Catalog` rejection.
    #[must_use]
    pub fn catalog(reason: impl Into<String>) -> Self {
        Self::Catalog {
            reason: reason.into(),
        }
    }

    /// Whether this error maps to a client-side (400-class) failure at a
    /// request/response boundary, as opposed to a deployment problem.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownIndustry { .. } | Self::InvalidAmount { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_industry_message_counts_supported_keys() {
        let err = CcastError::unknown_industry("foundry", ["a", "b", "c"]);
        assert_eq!(
            err.to_string(),
            "unknown industry `foundry` (3 supported)"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn invalid_amount_message_names_the_field() {
        let err = CcastError::invalid_amount("annual_emissions_tonnes", -4.0);
        assert_eq!(
            err.to_string(),
            "invalid annual_emissions_tonnes: -4 (must be positive)"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn catalog_rejection_is_not_a_client_error() {
        let err = CcastError::catalog("prices must be positive");
        assert!(!err.is_client_error());
    }
}
