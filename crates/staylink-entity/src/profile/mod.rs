//! Role profile entities (business store).

pub mod model;

pub use model::{CreatorProfile, HotelProfile, ListingSummary};
