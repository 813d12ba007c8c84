use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ShipDoc {
    pub id: i64,
    pub name: String,
    pub planet: String,
    /// TRANSPORT, MILITARY or MERCHANT
    pub ship_type: String,
    /// Epoch millis
    pub prod_date: i64,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

/// Every field optional; create requires all but `isUsed`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ShipDraftDoc {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<String>,
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
    components(
        schemas(
            HealthResponse,
            ShipDoc,
            ShipDraftDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "ships")
    )
)]
pub struct ApiDoc;
