use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use service::pagination::Pagination;
use service::ship::{parse_ship_id, Ship, ShipCriteria, ShipDraft, ShipType};

use crate::{errors::JsonApiError, state::ServerState};

/// Filters shared by list and count, plus list ordering and paging.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipListQuery {
    pub name: Option<String>,
    pub planet: Option<String>,
    #[param(value_type = Option<String>)]
    pub ship_type: Option<ShipType>,
    /// Epoch millis, exclusive
    pub after: Option<i64>,
    /// Epoch millis, exclusive
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    /// `id`, `speed`, `prodDate`, `rating` (or `ID`, `SPEED`, `DATE`, `RATING`)
    pub order: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl ShipListQuery {
    pub fn criteria(&self) -> ShipCriteria {
        ShipCriteria {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self.after,
            before: self.before,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        }
    }

    pub fn page(&self) -> Pagination {
        Pagination::from_parts(self.page_number, self.page_size)
    }
}

fn ship_id(raw: &str) -> Result<i64, JsonApiError> {
    Ok(parse_ship_id(raw)?)
}

/// Empty or `null` bodies read as no payload.
fn read_draft(body: &[u8]) -> Result<Option<ShipDraft>, JsonApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<ShipDraft>>(body)
        .map_err(|e| JsonApiError::bad_request(format!("malformed ship payload: {e}")))
}

#[utoipa::path(
    get, path = "/rest/ships", tag = "ships",
    params(ShipListQuery),
    responses(
        (status = 200, description = "One page of matching ships", body = [crate::openapi::ShipDoc]),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ShipListQuery>,
) -> Result<Json<Vec<Ship>>, JsonApiError> {
    let page = q.page();
    let ships = state.ships.list(&q.criteria(), q.order.as_deref(), page).await?;
    debug!(returned = ships.len(), page = page.page_number, size = page.page_size, "list ships");
    Ok(Json(ships))
}

#[utoipa::path(
    get, path = "/rest/ships/count", tag = "ships",
    params(ShipListQuery),
    responses(
        (status = 200, description = "Number of matching ships", body = usize),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn count(
    State(state): State<ServerState>,
    Query(q): Query<ShipListQuery>,
) -> Result<Json<usize>, JsonApiError> {
    Ok(Json(state.ships.count(&q.criteria()).await?))
}

#[utoipa::path(
    get, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id")),
    responses(
        (status = 200, description = "Ship found", body = crate::openapi::ShipDoc),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<Json<Ship>, JsonApiError> {
    let id = ship_id(&raw)?;
    Ok(Json(state.ships.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/rest/ships", tag = "ships",
    request_body = crate::openapi::ShipDraftDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ShipDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(State(state): State<ServerState>, body: Bytes) -> Result<Json<Ship>, JsonApiError> {
    let draft = read_draft(&body)?.ok_or_else(|| JsonApiError::bad_request("ship payload is required"))?;
    Ok(Json(state.ships.create(draft).await?))
}

#[utoipa::path(
    post, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id")),
    request_body = crate::openapi::ShipDraftDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ShipDoc),
        (status = 400, description = "Invalid id or payload"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> Result<Json<Ship>, JsonApiError> {
    let id = ship_id(&raw)?;
    let draft = read_draft(&body)?;
    Ok(Json(state.ships.update(id, draft).await?))
}

#[utoipa::path(
    delete, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(raw): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    let id = ship_id(&raw)?;
    state.ships.delete(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_null_bodies_are_no_payload() {
        assert!(read_draft(b"").unwrap().is_none());
        assert!(read_draft(b"  \n").unwrap().is_none());
        assert!(read_draft(b"null").unwrap().is_none());
        assert_eq!(read_draft(b"{}").unwrap(), Some(ShipDraft::default()));
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let err = read_draft(br#"{"speed":"fast"}"#).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn query_maps_onto_criteria_and_page() {
        let q = ShipListQuery {
            planet: Some("Mars".into()),
            ship_type: Some(ShipType::Merchant),
            max_crew_size: Some(10),
            page_number: Some(2),
            ..Default::default()
        };
        let c = q.criteria();
        assert_eq!(c.planet.as_deref(), Some("Mars"));
        assert_eq!(c.ship_type, Some(ShipType::Merchant));
        assert_eq!(c.max_crew_size, Some(10));
        assert!(c.name.is_none());
        assert_eq!(q.page(), Pagination { page_number: 2, page_size: 3 });
    }
}
