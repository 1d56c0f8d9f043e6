//! Canonical network inventory model and queries over it

mod models;
pub mod search;

pub use models::{Device, Location, Region, SubDevice};
pub use search::{SearchField, SearchHit, SearchQuery, search, suggest};
