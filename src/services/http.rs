//! HTTP/JSON clients for the backend services

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument, warn};

use super::{
    GeoRequest, GeoResponse, GeoService, ProfileRequest, ProfileResponse, ProfileService,
    RateRequest, RateResponse, RateService,
};
use crate::config::ServiceEndpoint;
use crate::{HotelGatewayError, Result};

/// A single backend reachable by POSTing JSON to `{base_url}/{path}`
#[derive(Debug, Clone)]
struct JsonEndpoint {
    client: Client,
    base_url: String,
    service: &'static str,
}

impl JsonEndpoint {
    fn new(service: &'static str, endpoint: &ServiceEndpoint) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_seconds.into()))
            .user_agent(concat!("hotel-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                HotelGatewayError::config(format!("Failed to create {service} HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            service,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("{} service request URL: {}", self.service, url);
        let start_time = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("{} service request failed: {}", self.service, e);
                if e.is_connect() || e.is_timeout() {
                    HotelGatewayError::unavailable(self.service, e.to_string())
                } else {
                    HotelGatewayError::api(self.service, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_status(self.service, status, &error_text));
        }

        let parsed = response.json::<Resp>().await.map_err(|e| {
            error!("Failed to parse {} service response: {}", self.service, e);
            HotelGatewayError::invalid_response(self.service, e.to_string())
        })?;

        let elapsed = start_time.elapsed();
        debug!(
            "{} service answered in {:.3}s",
            self.service,
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!(
                "Slow {} service response detected: {:.3}s",
                self.service,
                elapsed.as_secs_f64()
            );
        }

        Ok(parsed)
    }
}

/// Map a non-success status to the matching error kind
fn classify_status(service: &str, status: StatusCode, body: &str) -> HotelGatewayError {
    match status {
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            HotelGatewayError::unavailable(service, format!("status {status}"))
        }
        _ => HotelGatewayError::api(service, format!("status {status}: {body}")),
    }
}

/// Geo-index service over HTTP
#[derive(Debug, Clone)]
pub struct HttpGeoClient {
    endpoint: JsonEndpoint,
}

impl HttpGeoClient {
    pub fn new(endpoint: &ServiceEndpoint) -> Result<Self> {
        Ok(Self {
            endpoint: JsonEndpoint::new("geo", endpoint)?,
        })
    }
}

#[async_trait]
impl GeoService for HttpGeoClient {
    #[instrument(skip(self), fields(lon = request.lon, lat = request.lat))]
    async fn nearby(&self, request: &GeoRequest) -> Result<GeoResponse> {
        self.endpoint.post("nearby", request).await
    }
}

/// Rate service over HTTP
#[derive(Debug, Clone)]
pub struct HttpRateClient {
    endpoint: JsonEndpoint,
}

impl HttpRateClient {
    pub fn new(endpoint: &ServiceEndpoint) -> Result<Self> {
        Ok(Self {
            endpoint: JsonEndpoint::new("rate", endpoint)?,
        })
    }
}

#[async_trait]
impl RateService for HttpRateClient {
    #[instrument(skip(self, request), fields(hotels = request.hotel_ids.len()))]
    async fn get_rates(&self, request: &RateRequest) -> Result<RateResponse> {
        self.endpoint.post("rates", request).await
    }
}

/// Profile service over HTTP
#[derive(Debug, Clone)]
pub struct HttpProfileClient {
    endpoint: JsonEndpoint,
}

impl HttpProfileClient {
    pub fn new(endpoint: &ServiceEndpoint) -> Result<Self> {
        Ok(Self {
            endpoint: JsonEndpoint::new("profile", endpoint)?,
        })
    }
}

#[async_trait]
impl ProfileService for HttpProfileClient {
    #[instrument(skip(self, request), fields(hotels = request.hotel_ids.len()))]
    async fn get_profiles(&self, request: &ProfileRequest) -> Result<ProfileResponse> {
        self.endpoint.post("profiles", request).await
    }
}
