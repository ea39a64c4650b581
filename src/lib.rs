//! `hotel-gateway` - hotel search aggregation
//!
//! Resolves hotels near a location through the geo service, keeps the ones
//! the rate service can book for the requested stay, fetches their profiles
//! and returns them as a GeoJSON feature collection.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod render;
pub mod search;
pub mod services;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use config::HotelGatewayConfig;
pub use error::HotelGatewayError;
pub use models::{Hotel, HotelQuery, RatePlan};
pub use provider::HotelProvider;
pub use search::{SearchResult, SearchService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, HotelGatewayError>;
