//! Ship resource: validation, rating, querying and persistence.

pub mod domain;
pub mod query;
pub mod rating;
pub mod repository;
pub mod service;
pub mod validation;

pub use domain::{parse_ship_id, ShipDraft};
pub use models::ship::{Model as Ship, NewShip, ShipType};
pub use query::{ShipCriteria, SortField};
pub use service::ShipService;
