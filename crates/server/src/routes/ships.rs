use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use models::ship::{self, ShipType};
use serde::Deserialize;
use service::{
    errors::ServiceError,
    pagination::PageRequest,
    ship::{ShipFilter, ShipOrder, ShipPayload},
};
use tracing::{info, warn};

use crate::{errors::JsonApiError, state::ServerState};

/// Filter keys shared by `/ships` and `/ships/count`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipFilterQuery {
    /// Case-sensitive substring of the name
    pub name: Option<String>,
    /// Case-sensitive substring of the planet
    pub planet: Option<String>,
    /// TRANSPORT, MILITARY or MERCHANT
    pub ship_type: Option<String>,
    /// Earliest production date, epoch millis
    pub after: Option<i64>,
    /// Latest production date, epoch millis
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

impl ShipFilterQuery {
    pub fn into_filter(self) -> Result<ShipFilter, ServiceError> {
        let ship_type = match self.ship_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<ShipType>()?),
        };
        Ok(ShipFilter {
            name: self.name,
            planet: self.planet,
            ship_type,
            after: self.after,
            before: self.before,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }
}

/// Sorting and paging keys of `/ships`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipPageQuery {
    /// ID, SPEED, CREW_SIZE, DATE or RATING; defaults to ID
    pub order: Option<String>,
    /// Zero-based, defaults to 0
    pub page_number: Option<u64>,
    /// At least 1, defaults to 3
    pub page_size: Option<u64>,
}

impl ShipPageQuery {
    pub fn order(&self) -> Result<ShipOrder, ServiceError> {
        match self.order.as_deref().map(str::trim) {
            None | Some("") => Ok(ShipOrder::default()),
            Some(raw) => raw.parse(),
        }
    }

    pub fn page(&self) -> Result<PageRequest, ServiceError> {
        PageRequest::from_optional(self.page_number, self.page_size)
    }
}

fn query<T>(q: Result<Query<T>, QueryRejection>) -> Result<T, JsonApiError> {
    q.map(|Query(v)| v).map_err(|e| JsonApiError::bad_request(e.body_text()))
}

fn body(b: Result<Json<ShipPayload>, JsonRejection>) -> Result<ShipPayload, JsonApiError> {
    b.map(|Json(v)| v).map_err(|e| {
        warn!(error = %e.body_text(), "rejected ship body");
        JsonApiError::bad_request(e.body_text())
    })
}

fn ship_id(p: Result<Path<i64>, PathRejection>) -> Result<i64, JsonApiError> {
    let Path(id) = p.map_err(|e| JsonApiError::bad_request(e.body_text()))?;
    if id <= 0 {
        return Err(JsonApiError::bad_request(format!("id must be positive, got {id}")));
    }
    Ok(id)
}

#[utoipa::path(
    get, path = "/ships", tag = "ships",
    params(ShipFilterQuery, ShipPageQuery),
    responses(
        (status = 200, description = "Page of matching ships", body = [crate::openapi::ShipDoc]),
        (status = 400, description = "Bad filter, order or paging value"),
        (status = 404, description = "No ship on this page")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    filter: Result<Query<ShipFilterQuery>, QueryRejection>,
    paging: Result<Query<ShipPageQuery>, QueryRejection>,
) -> Result<Json<Vec<ship::Model>>, JsonApiError> {
    let filter = query(filter)?.into_filter()?;
    let paging = query(paging)?;
    let (order, page) = (paging.order()?, paging.page()?);

    let ships = state.ships.read_all(&filter, order, page).await?;
    if ships.is_empty() {
        info!(page = page.page_number, "list ships: empty page");
        return Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("no ships found".into())));
    }
    info!(count = ships.len(), page = page.page_number, "list ships");
    Ok(Json(ships))
}

#[utoipa::path(
    get, path = "/ships/count", tag = "ships",
    params(ShipFilterQuery),
    responses(
        (status = 200, description = "Number of matching ships", body = u64),
        (status = 400, description = "Bad filter value")
    )
)]
pub async fn count(
    State(state): State<ServerState>,
    filter: Result<Query<ShipFilterQuery>, QueryRejection>,
) -> Result<Json<u64>, JsonApiError> {
    let filter = query(filter)?.into_filter()?;
    let n = state.ships.count_all(&filter).await?;
    Ok(Json(n))
}

#[utoipa::path(
    get, path = "/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id, positive")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ShipDoc),
        (status = 400, description = "Bad id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let id = ship_id(id)?;
    Ok(Json(state.ships.read(id).await?))
}

#[utoipa::path(
    post, path = "/ships", tag = "ships",
    request_body = crate::openapi::ShipPayloadDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ShipDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ShipPayload>, JsonRejection>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let payload = body(payload)?;
    let created = state.ships.create(payload).await?;
    info!(id = created.id, name = %created.name, rating = created.rating, "ship_create_ok");
    Ok(Json(created))
}

#[utoipa::path(
    post, path = "/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id, positive")),
    request_body = crate::openapi::ShipPayloadDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ShipDoc),
        (status = 400, description = "Bad id or Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ShipPayload>, JsonRejection>,
) -> Result<Json<ship::Model>, JsonApiError> {
    let id = ship_id(id)?;
    let payload = body(payload)?;
    let updated = state.ships.update(payload, id).await?;
    info!(id, rating = updated.rating, "ship_update_ok");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/ships/{id}", tag = "ships",
    params(("id" = i64, Path, description = "Ship id, positive")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Bad id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = ship_id(id)?;
    state.ships.delete(id).await?;
    info!(id, "ship_delete_ok");
    Ok(StatusCode::OK)
}
