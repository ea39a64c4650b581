//! Nearby search: proximity lookup narrowed down to hotels with availability

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::Result;
use crate::models::ValidQuery;
use crate::services::{GeoRequest, GeoService, RateRequest, RateService};

/// Hotels near a location that have at least one rate plan for the stay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub hotel_ids: Vec<String>,
}

/// Runs the geo lookup, then the rate lookup over its candidates
#[derive(Clone)]
pub struct SearchService {
    geo: Arc<dyn GeoService>,
    rate: Arc<dyn RateService>,
}

impl SearchService {
    pub fn new(geo: Arc<dyn GeoService>, rate: Arc<dyn RateService>) -> Self {
        Self { geo, rate }
    }

    /// Candidate hotels around the query point that are bookable in its window.
    ///
    /// Either call failing fails the whole search.
    pub async fn nearby(&self, query: &ValidQuery) -> Result<SearchResult> {
        debug!("Search service called with parameters: {:?}", query);

        let candidates = self
            .geo
            .nearby(&GeoRequest {
                lon: query.lon,
                lat: query.lat,
                in_date: query.in_date.clone(),
                out_date: query.out_date.clone(),
            })
            .await?
            .hotel_ids;
        info!("Retrieved {} candidate hotels from geo service", candidates.len());

        let rates = self
            .rate
            .get_rates(&RateRequest {
                hotel_ids: candidates.clone(),
                in_date: query.in_date.clone(),
                out_date: query.out_date.clone(),
            })
            .await?;
        info!("Retrieved {} rate plans from rate service", rates.rate_plans.len());

        let hotel_ids = available_ids(
            &candidates,
            rates.rate_plans.iter().map(|p| p.hotel_id.as_str()),
        );
        Ok(SearchResult { hotel_ids })
    }
}

/// Distinct rate-plan hotel ids in first-seen order, limited to the candidates
fn available_ids<'a>(candidates: &[String], rated: impl Iterator<Item = &'a str>) -> Vec<String> {
    let candidates: HashSet<&str> = candidates.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for id in rated {
        if !candidates.contains(id) {
            warn!("Rate service returned a plan for non-candidate hotel {}", id);
            continue;
        }
        if seen.insert(id) {
            ids.push(id.to_string());
        }
    }

    ids
}
