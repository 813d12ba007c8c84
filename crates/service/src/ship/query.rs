//! Ship filtering and ordering.

use std::cmp::Ordering;

use tracing::warn;

use super::{Ship, ShipType};
use crate::pagination::Pagination;

/// Optional list/count filters; every present option narrows the result.
///
/// `after` and `before` are epoch milliseconds and compare strictly. All
/// numeric bounds are inclusive. Text filters are case-sensitive substrings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipCriteria {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

impl ShipCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Conjunction of every present criterion.
    pub fn matches(&self, ship: &Ship) -> bool {
        let millis = ship.prod_date.timestamp_millis();
        self.name.as_deref().map_or(true, |n| ship.name.contains(n))
            && self.planet.as_deref().map_or(true, |p| ship.planet.contains(p))
            && self.ship_type.map_or(true, |t| ship.ship_type == t)
            && self.after.map_or(true, |after| millis > after)
            && self.before.map_or(true, |before| millis < before)
            && self.is_used.map_or(true, |used| ship.is_used == used)
            && self.min_speed.map_or(true, |min| ship.speed >= min)
            && self.max_speed.map_or(true, |max| ship.speed <= max)
            && self.min_crew_size.map_or(true, |min| ship.crew_size >= min)
            && self.max_crew_size.map_or(true, |max| ship.crew_size <= max)
            && self.min_rating.map_or(true, |min| ship.rating >= min)
            && self.max_rating.map_or(true, |max| ship.rating <= max)
    }
}

/// Keep the ships matching `criteria`, preserving input order.
pub fn filter(ships: Vec<Ship>, criteria: &ShipCriteria) -> Vec<Ship> {
    if criteria.is_empty() {
        return ships;
    }
    ships.into_iter().filter(|s| criteria.matches(s)).collect()
}

/// Field a ship list can be ordered by. Always ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Id,
    Speed,
    ProdDate,
    Rating,
}

impl SortField {
    /// Accepts the field names (`id`, `speed`, `prodDate`, `rating`) and the
    /// order constants (`ID`, `SPEED`, `DATE`, `RATING`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" | "ID" => Some(Self::Id),
            "speed" | "SPEED" => Some(Self::Speed),
            "prodDate" | "DATE" => Some(Self::ProdDate),
            "rating" | "RATING" => Some(Self::Rating),
            _ => None,
        }
    }

    /// Missing or unrecognized names order by id.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            None => Self::Id,
            Some(raw) => Self::from_name(raw).unwrap_or_else(|| {
                warn!(order = %raw, "unknown sort field; ordering by id");
                Self::Id
            }),
        }
    }

    pub fn compare(self, a: &Ship, b: &Ship) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Speed => a.speed.total_cmp(&b.speed),
            Self::ProdDate => a.prod_date.cmp(&b.prod_date),
            Self::Rating => a.rating.total_cmp(&b.rating),
        }
    }
}

/// Stable sort by `order`, then cut out the requested page.
pub fn paginate(mut ships: Vec<Ship>, order: SortField, page: Pagination) -> Vec<Ship> {
    ships.sort_by(|a, b| order.compare(a, b));
    page.apply(ships)
}
