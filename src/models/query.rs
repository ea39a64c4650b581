//! Hotel search query and its validation

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::HotelGatewayError;

/// Raw search parameters as received from the caller
///
/// Every field is optional on the wire so that a malformed query can be
/// rejected by [`HotelQuery::validate`] instead of failing extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelQuery {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub in_date: Option<String>,
    pub out_date: Option<String>,
}

/// A query that passed validation; all fields are present
#[derive(Debug, Clone, PartialEq)]
pub struct ValidQuery {
    pub lon: f64,
    pub lat: f64,
    pub in_date: String,
    pub out_date: String,
}

impl HotelQuery {
    #[must_use]
    pub fn new(lon: f64, lat: f64, in_date: &str, out_date: &str) -> Self {
        Self {
            lon: Some(lon),
            lat: Some(lat),
            in_date: Some(in_date.to_string()),
            out_date: Some(out_date.to_string()),
        }
    }

    /// Check the query, returning the first rule it breaks.
    ///
    /// Dates are opaque tokens here; only blankness is checked.
    pub fn validate(&self) -> crate::Result<ValidQuery> {
        let (Some(in_date), Some(out_date)) = (
            non_blank(self.in_date.as_deref()),
            non_blank(self.out_date.as_deref()),
        ) else {
            error!("Please specify proper inDate/outDate params");
            return Err(HotelGatewayError::validation(
                "inDate and outDate must both be specified",
            ));
        };

        let (Some(lon), Some(lat)) = (self.lon, self.lat) else {
            error!("Please specify proper lon/lat params");
            return Err(HotelGatewayError::validation(
                "lon and lat must both be specified",
            ));
        };

        Ok(ValidQuery {
            lon,
            lat,
            in_date: in_date.to_string(),
            out_date: out_date.to_string(),
        })
    }

    /// `true` when the query must be rejected before any remote call
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.validate().is_err()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
