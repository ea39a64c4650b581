//! Backend service contracts
//!
//! Each backend (geo index, rates, profiles) is reached through a small async
//! trait so the search pipeline can run against the HTTP clients in
//! [`http`] or against in-memory doubles in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::models::{Hotel, RatePlan};

pub mod http;

pub use http::{HttpGeoClient, HttpProfileClient, HttpRateClient};

/// Proximity lookup around a point for a stay window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRequest {
    pub lon: f64,
    pub lat: f64,
    pub in_date: String,
    pub out_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoResponse {
    #[serde(default)]
    pub hotel_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub hotel_ids: Vec<String>,
    pub in_date: String,
    pub out_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    #[serde(default)]
    pub rate_plans: Vec<RatePlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub hotel_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(default)]
    pub hotels: Vec<Hotel>,
}

/// Geo-index service: candidate hotels near a location
#[async_trait]
pub trait GeoService: Send + Sync {
    async fn nearby(&self, request: &GeoRequest) -> Result<GeoResponse>;
}

/// Rate service: rate plans for hotels within a stay window
#[async_trait]
pub trait RateService: Send + Sync {
    async fn get_rates(&self, request: &RateRequest) -> Result<RateResponse>;
}

/// Profile service: descriptive records for hotels
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_profiles(&self, request: &ProfileRequest) -> Result<ProfileResponse>;
}
