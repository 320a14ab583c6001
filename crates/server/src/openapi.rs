use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipTypeDoc { Transport, Military, Merchant }

/// A stored ship.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipDoc {
    pub id: i64,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipTypeDoc,
    /// Epoch milliseconds, within [2800-01-01, 3020-01-01)
    pub prod_date: i64,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    /// Derived by the server
    pub rating: f64,
}

/// Create needs every field except `isUsed`; update accepts any subset.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipPayloadDoc {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipTypeDoc>,
    pub prod_date: Option<i64>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::ships::list,
        crate::routes::ships::count,
        crate::routes::ships::get,
        crate::routes::ships::create,
        crate::routes::ships::update,
        crate::routes::ships::delete,
    ),
    components(schemas(HealthResponse, ShipTypeDoc, ShipDoc, ShipPayloadDoc)),
    tags((name = "health"), (name = "ships"))
)]
pub struct ApiDoc;
