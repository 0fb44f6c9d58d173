use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::sales::{CreateSaleRequest, SaleList, SaleWithRelations, UpdateSaleRequest},
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    response::{ApiResponse, Deleted},
    routes::params::SaleListQuery,
    services::sale_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/{id}", get(get_sale).put(update_sale).delete(delete_sale))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    params(SaleListQuery),
    responses(
        (status = 200, description = "List sales, newest first", body = ApiResponse<SaleList>),
        (status = 400, description = "Invalid filter"),
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SaleListQuery>,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    let resp = sale_service::list_sales(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    params(("id" = Uuid, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Get sale", body = ApiResponse<SaleWithRelations>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn get_sale(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<SaleWithRelations>>> {
    let resp = sale_service::get_sale(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Record sale and credit the register when completed", body = ApiResponse<SaleWithRelations>),
        (status = 400, description = "Missing or invalid field"),
        (status = 404, description = "User or cash register not found"),
        (status = 409, description = "Cash register is not open"),
    ),
    tag = "Sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSaleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SaleWithRelations>>)> {
    let resp = sale_service::create_sale(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    params(("id" = Uuid, Path, description = "Sale ID")),
    request_body = UpdateSaleRequest,
    responses(
        (status = 200, description = "Updated sale; register balance reconciled", body = ApiResponse<SaleWithRelations>),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Sale not found"),
        (status = 409, description = "Cash register is closed"),
    ),
    tag = "Sales"
)]
pub async fn update_sale(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateSaleRequest>,
) -> AppResult<Json<ApiResponse<SaleWithRelations>>> {
    let resp = sale_service::update_sale(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    params(("id" = Uuid, Path, description = "Sale ID")),
    responses(
        (status = 200, description = "Deleted sale; completed totals are debited", body = ApiResponse<Deleted>),
        (status = 404, description = "Sale not found"),
        (status = 409, description = "Cash register is closed"),
    ),
    tag = "Sales"
)]
pub async fn delete_sale(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = sale_service::delete_sale(&state, id).await?;
    Ok(Json(resp))
}
