//! Rate plans as returned by the rate service

use serde::{Deserialize, Serialize};

/// One bookable rate for a hotel within a stay window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatePlan {
    pub hotel_id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub in_date: String,
    #[serde(default)]
    pub out_date: String,
    #[serde(default)]
    pub room_type: Option<RoomType>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub bookable_rate: f64,
    pub total_rate: f64,
    pub total_rate_inclusive: f64,
    pub code: String,
    pub currency: String,
    pub room_description: String,
}

impl RatePlan {
    #[must_use]
    pub fn new(hotel_id: &str, in_date: &str, out_date: &str) -> Self {
        Self {
            hotel_id: hotel_id.to_string(),
            code: String::new(),
            in_date: in_date.to_string(),
            out_date: out_date.to_string(),
            room_type: None,
        }
    }
}
