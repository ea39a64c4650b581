pub mod hotel;
pub mod query;
pub mod rate;

pub use hotel::{Address, Hotel};
pub use query::{HotelQuery, ValidQuery};
pub use rate::{RatePlan, RoomType};
