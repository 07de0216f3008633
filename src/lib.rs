pub mod api;
pub mod catalog;
pub mod diag;
pub mod error;
pub mod model;
pub mod parser;
pub mod scanner;
pub mod serializer;

pub use api::{JsonPersistence, MergeMode};
pub use catalog::{PoiCatalog, WaypointCatalog};
pub use model::{Poi, PoiCategory, Waypoint};
