//! GeoJSON rendering of hotel records

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use serde_json::json;
use tracing::warn;

use crate::models::Hotel;

/// Collection returned whenever there is nothing to show
#[must_use]
pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// One point feature per hotel, in input order.
///
/// Hotels without both coordinates are left out.
#[must_use]
pub fn render_hotels(hotels: &[Hotel]) -> FeatureCollection {
    let features = hotels
        .iter()
        .filter_map(|hotel| {
            let feature = hotel_feature(hotel);
            if feature.is_none() {
                warn!("Skipping hotel {} without coordinates", hotel.id);
            }
            feature
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn hotel_feature(hotel: &Hotel) -> Option<Feature> {
    let point = hotel.location()?;

    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), json!(hotel.name));
    properties.insert("phone".to_string(), json!(hotel.phone_number));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(&point))),
        id: Some(Id::String(hotel.id.clone())),
        properties: Some(properties),
        foreign_members: None,
    })
}
