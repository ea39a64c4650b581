//! Hotel provider: the request-level pipeline behind `GET /api/hotels`
//!
//! A query flows through validation, the nearby search (geo then rate), the
//! profile lookup and finally GeoJSON rendering. Every failure along the way
//! is logged and collapses to an empty feature collection, so callers always
//! receive a structurally valid response.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use geojson::FeatureCollection;
use tracing::{error, info, instrument};

use crate::config::ServicesConfig;
use crate::models::{HotelQuery, ValidQuery};
use crate::render::{empty_collection, render_hotels};
use crate::search::SearchService;
use crate::services::{
    GeoService, HttpGeoClient, HttpProfileClient, HttpRateClient, ProfileRequest, ProfileService,
    RateService,
};
use crate::Result;

#[derive(Clone)]
pub struct HotelProvider {
    search: SearchService,
    profiles: Arc<dyn ProfileService>,
}

impl HotelProvider {
    pub fn new(
        geo: Arc<dyn GeoService>,
        rate: Arc<dyn RateService>,
        profiles: Arc<dyn ProfileService>,
    ) -> Self {
        Self {
            search: SearchService::new(geo, rate),
            profiles,
        }
    }

    /// Build a provider backed by the HTTP clients for the configured services
    pub fn from_config(services: &ServicesConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(HttpGeoClient::new(&services.geo)?),
            Arc::new(HttpRateClient::new(&services.rate)?),
            Arc::new(HttpProfileClient::new(&services.profile)?),
        ))
    }

    /// Hotels near the query point with availability, as GeoJSON.
    ///
    /// Never fails: an invalid query or any backend fault yields an empty
    /// collection.
    #[instrument(skip(self))]
    pub async fn fetch_hotels(&self, query: &HotelQuery) -> FeatureCollection {
        info!("Checking parameters passed to fetch hotels");
        let Ok(query) = query.validate() else {
            return empty_collection();
        };

        match AssertUnwindSafe(self.run(&query)).catch_unwind().await {
            Ok(Ok(collection)) => collection,
            Ok(Err(e)) if e.is_downstream() => {
                error!("One of the backend services failed: {}", e);
                empty_collection()
            }
            Ok(Err(e)) => {
                error!("Unknown error while fetching hotels: {}", e);
                empty_collection()
            }
            Err(panic) => {
                error!(
                    "Panic while fetching hotels: {}",
                    panic_message(panic.as_ref())
                );
                empty_collection()
            }
        }
    }

    async fn run(&self, query: &ValidQuery) -> Result<FeatureCollection> {
        let search = self.search.nearby(query).await?;
        info!(
            "Successfully retrieved {} available hotels from search",
            search.hotel_ids.len()
        );

        let profiles = self
            .profiles
            .get_profiles(&ProfileRequest {
                hotel_ids: search.hotel_ids,
            })
            .await?;
        info!(
            "Successfully retrieved {} profiles from profile service",
            profiles.hotels.len()
        );

        Ok(render_hotels(&profiles.hotels))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

impl std::fmt::Debug for HotelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotelProvider").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HotelGatewayError;
    use crate::models::{Hotel, RatePlan};
    use crate::services::{GeoRequest, GeoResponse, ProfileResponse, RateRequest, RateResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted backends that record every call they receive
    #[derive(Default)]
    struct Backends {
        geo_ids: Option<Vec<String>>,
        rated_ids: Option<Vec<String>>,
        hotels: Option<Vec<Hotel>>,
        calls: Mutex<Vec<Call>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Geo(GeoRequest),
        Rate(RateRequest),
        Profile(ProfileRequest),
    }

    impl Backends {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    struct Geo(Arc<Backends>);
    struct Rate(Arc<Backends>);
    struct Profile(Arc<Backends>);

    #[async_trait]
    impl GeoService for Geo {
        async fn nearby(&self, request: &GeoRequest) -> Result<GeoResponse> {
            self.0.record(Call::Geo(request.clone()));
            let hotel_ids = self
                .0
                .geo_ids
                .clone()
                .ok_or_else(|| HotelGatewayError::unavailable("geo", "down"))?;
            Ok(GeoResponse { hotel_ids })
        }
    }

    #[async_trait]
    impl RateService for Rate {
        async fn get_rates(&self, request: &RateRequest) -> Result<RateResponse> {
            self.0.record(Call::Rate(request.clone()));
            let ids = self
                .0
                .rated_ids
                .clone()
                .ok_or_else(|| HotelGatewayError::unavailable("rate", "down"))?;
            Ok(RateResponse {
                rate_plans: ids
                    .iter()
                    .map(|id| RatePlan::new(id, &request.in_date, &request.out_date))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl ProfileService for Profile {
        async fn get_profiles(&self, request: &ProfileRequest) -> Result<ProfileResponse> {
            self.0.record(Call::Profile(request.clone()));
            let hotels = self
                .0
                .hotels
                .clone()
                .ok_or_else(|| HotelGatewayError::invalid_response("profile", "eof"))?;
            Ok(ProfileResponse {
                hotels: hotels
                    .into_iter()
                    .filter(|h| request.hotel_ids.contains(&h.id))
                    .collect(),
            })
        }
    }

    fn provider(backends: &Arc<Backends>) -> HotelProvider {
        HotelProvider::new(
            Arc::new(Geo(backends.clone())),
            Arc::new(Rate(backends.clone())),
            Arc::new(Profile(backends.clone())),
        )
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_hotels() -> Vec<Hotel> {
        vec![
            Hotel::new("h1", "Grand Hotel", "555-1000", -122.4, 37.7),
            Hotel::new("h2", "Harbor Inn", "555-2000", -122.41, 37.8),
            Hotel::new("h3", "Hilltop Lodge", "555-3000", -122.45, 37.75),
        ]
    }

    fn valid_query() -> HotelQuery {
        HotelQuery::new(-122.4, 37.7, "2024-06-01", "2024-06-05")
    }

    fn feature_ids(collection: &FeatureCollection) -> Vec<String> {
        collection
            .features
            .iter()
            .map(|f| match &f.id {
                Some(geojson::feature::Id::String(id)) => id.clone(),
                other => panic!("unexpected feature id {other:?}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_end_to_end_single_available_hotel() {
        let backends = Arc::new(Backends {
            geo_ids: Some(ids(&["h1", "h2"])),
            rated_ids: Some(ids(&["h2"])),
            hotels: Some(sample_hotels()),
            ..Backends::default()
        });

        let collection = provider(&backends).fetch_hotels(&valid_query()).await;

        assert_eq!(feature_ids(&collection), ids(&["h2"]));
        assert_eq!(
            backends.calls(),
            vec![
                Call::Geo(GeoRequest {
                    lon: -122.4,
                    lat: 37.7,
                    in_date: "2024-06-01".to_string(),
                    out_date: "2024-06-05".to_string(),
                }),
                Call::Rate(RateRequest {
                    hotel_ids: ids(&["h1", "h2"]),
                    in_date: "2024-06-01".to_string(),
                    out_date: "2024-06-05".to_string(),
                }),
                Call::Profile(ProfileRequest {
                    hotel_ids: ids(&["h2"]),
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_unavailable_candidate_never_reaches_profiles() {
        let backends = Arc::new(Backends {
            geo_ids: Some(ids(&["h1", "h2", "h3"])),
            rated_ids: Some(ids(&["h3", "h1"])),
            hotels: Some(sample_hotels()),
            ..Backends::default()
        });

        let collection = provider(&backends).fetch_hotels(&valid_query()).await;

        let profile_call = backends
            .calls()
            .into_iter()
            .find_map(|c| match c {
                Call::Profile(request) => Some(request),
                _ => None,
            })
            .unwrap();
        let mut requested = profile_call.hotel_ids.clone();
        requested.sort();
        assert_eq!(requested, ids(&["h1", "h3"]));
        assert!(!feature_ids(&collection).contains(&"h2".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_queries_issue_no_calls() {
        let backends = Arc::new(Backends {
            geo_ids: Some(ids(&["h1"])),
            rated_ids: Some(ids(&["h1"])),
            hotels: Some(sample_hotels()),
            ..Backends::default()
        });
        let provider = provider(&backends);

        let mut blank_date = valid_query();
        blank_date.in_date = Some("  ".to_string());
        let mut missing_out = valid_query();
        missing_out.out_date = None;
        let mut missing_lon = valid_query();
        missing_lon.lon = None;
        let mut missing_lat = valid_query();
        missing_lat.lat = None;

        for query in [blank_date, missing_out, missing_lon, missing_lat] {
            let collection = provider.fetch_hotels(&query).await;
            assert_eq!(collection, empty_collection());
        }
        assert!(backends.calls().is_empty());
    }

    #[tokio::test]
    async fn test_geo_failure_stops_pipeline() {
        let backends = Arc::new(Backends {
            geo_ids: None,
            rated_ids: Some(ids(&["h1"])),
            hotels: Some(sample_hotels()),
            ..Backends::default()
        });

        let collection = provider(&backends).fetch_hotels(&valid_query()).await;

        assert_eq!(collection, empty_collection());
        let calls = backends.calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Call::Geo(_)));
    }

    #[tokio::test]
    async fn test_rate_failure_skips_profiles() {
        let backends = Arc::new(Backends {
            geo_ids: Some(ids(&["h1"])),
            rated_ids: None,
            hotels: Some(sample_hotels()),
            ..Backends::default()
        });

        let collection = provider(&backends).fetch_hotels(&valid_query()).await;

        assert_eq!(collection, empty_collection());
        assert!(
            !backends
                .calls()
                .iter()
                .any(|c| matches!(c, Call::Profile(_)))
        );
    }

    #[tokio::test]
    async fn test_profile_failure_collapses_to_empty() {
        let backends = Arc::new(Backends {
            geo_ids: Some(ids(&["h1"])),
            rated_ids: Some(ids(&["h1"])),
            hotels: None,
            ..Backends::default()
        });

        let collection = provider(&backends).fetch_hotels(&valid_query()).await;

        assert_eq!(collection, empty_collection());
        assert_eq!(backends.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_each_backend_called_once() {
        let backends = Arc::new(Backends {
            geo_ids: Some(Vec::new()),
            rated_ids: Some(Vec::new()),
            hotels: Some(Vec::new()),
            ..Backends::default()
        });

        let collection = provider(&backends).fetch_hotels(&valid_query()).await;

        assert!(collection.features.is_empty());
        let calls = backends.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], Call::Geo(_)));
        assert!(matches!(calls[1], Call::Rate(_)));
        assert!(matches!(calls[2], Call::Profile(_)));
    }

    #[tokio::test]
    async fn test_hotel_without_coordinates_skipped() {
        let mut hotels = sample_hotels();
        hotels[0].address = None;
        let backends = Arc::new(Backends {
            geo_ids: Some(ids(&["h1", "h2"])),
            rated_ids: Some(ids(&["h1", "h2"])),
            hotels: Some(hotels),
            ..Backends::default()
        });

        let collection = provider(&backends).fetch_hotels(&valid_query()).await;

        assert_eq!(feature_ids(&collection), ids(&["h2"]));
    }

    /// Profile backend that fails in a way no HTTP client would report
    enum BrokenProfiles {
        Panics,
        Internal,
    }

    #[async_trait]
    impl ProfileService for BrokenProfiles {
        async fn get_profiles(&self, _request: &ProfileRequest) -> Result<ProfileResponse> {
            match self {
                BrokenProfiles::Panics => panic!("profile client blew up"),
                BrokenProfiles::Internal => Err(HotelGatewayError::general("profile state lost")),
            }
        }
    }

    fn provider_with_profiles(profiles: BrokenProfiles) -> HotelProvider {
        let backends = Arc::new(Backends {
            geo_ids: Some(ids(&["h1"])),
            rated_ids: Some(ids(&["h1"])),
            hotels: Some(sample_hotels()),
            ..Backends::default()
        });
        HotelProvider::new(
            Arc::new(Geo(backends.clone())),
            Arc::new(Rate(backends)),
            Arc::new(profiles),
        )
    }

    #[tokio::test]
    async fn test_panicking_profile_client_yields_empty_collection() {
        let provider = provider_with_profiles(BrokenProfiles::Panics);

        let collection = tokio::spawn(async move { provider.fetch_hotels(&valid_query()).await })
            .await
            .expect("fetch_hotels must not unwind");

        assert_eq!(collection, empty_collection());
        assert_eq!(
            serde_json::to_value(&collection).unwrap(),
            serde_json::json!({"type": "FeatureCollection", "features": []})
        );
    }

    #[tokio::test]
    async fn test_general_error_yields_empty_collection() {
        let provider = provider_with_profiles(BrokenProfiles::Internal);

        let collection = provider.fetch_hotels(&valid_query()).await;

        assert_eq!(collection, empty_collection());
    }

    #[test]
    fn test_panic_message_extraction() {
        let literal: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_message(literal.as_ref()), "static message");

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(owned.as_ref()), "owned message");

        let other: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
