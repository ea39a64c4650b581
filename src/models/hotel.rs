//! Hotel detail records as returned by the profile service

use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Full description of a hotel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Postal address; coordinates may be missing for incomplete records
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Hotel {
    #[must_use]
    pub fn new(id: &str, name: &str, phone_number: &str, lon: f64, lat: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            description: None,
            address: Some(Address {
                lat: Some(lat),
                lon: Some(lon),
                ..Address::default()
            }),
        }
    }

    /// Geographic point of the hotel, `None` unless both coordinates are known
    #[must_use]
    pub fn location(&self) -> Option<Point<f64>> {
        let address = self.address.as_ref()?;
        match (address.lon, address.lat) {
            (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_lon_lat() {
        let hotel = Hotel::new("h1", "Grand Hotel", "555-1000", -122.4, 37.7);
        let point = hotel.location().unwrap();
        assert_eq!(point.x(), -122.4);
        assert_eq!(point.y(), 37.7);
    }

    #[test]
    fn test_location_missing() {
        let mut hotel = Hotel::new("h1", "Grand Hotel", "555-1000", -122.4, 37.7);
        hotel.address.as_mut().unwrap().lat = None;
        assert!(hotel.location().is_none());

        hotel.address = None;
        assert!(hotel.location().is_none());
    }

    #[test]
    fn test_deserialize_profile_record() {
        let hotel: Hotel = serde_json::from_str(
            r#"{
                "id": "h2",
                "name": "Harbor Inn",
                "phoneNumber": "555-2000",
                "address": {"streetName": "Bay St", "city": "SF", "lat": 37.8, "lon": -122.41}
            }"#,
        )
        .unwrap();
        assert_eq!(hotel.phone_number, "555-2000");
        assert_eq!(hotel.location(), Some(Point::new(-122.41, 37.8)));
    }
}
