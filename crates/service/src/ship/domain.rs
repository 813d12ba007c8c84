use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use models::ship::ShipType;

/// Request payload for create and partial update. Absent fields are `None`.
///
/// `id` and `rating` are server-owned; if a client sends them they are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub planet: Option<String>,
    #[serde(default)]
    pub ship_type: Option<ShipType>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub prod_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_used: Option<bool>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub crew_size: Option<i32>,
}

/// Parse a path id. Rejects anything that is not a positive integer.
pub fn parse_ship_id(raw: &str) -> Result<i64, ServiceError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ServiceError::Validation(format!("invalid ship id: {raw}"))),
    }
}
