use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{HotelProvider, models::HotelQuery};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

pub fn router(provider: HotelProvider) -> Router {
    Router::new()
        .route("/hotels", get(get_hotels))
        .route("/health", get(get_health))
        .with_state(provider)
}

/// Always 200; a rejected query or a backend outage yields an empty collection.
async fn get_hotels(
    State(provider): State<HotelProvider>,
    query: Result<Query<HotelQuery>, QueryRejection>,
) -> Json<FeatureCollection> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!("Unparseable hotel query: {}", rejection);
            HotelQuery::default()
        }
    };
    Json(provider.fetch_hotels(&query).await)
}

async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}
