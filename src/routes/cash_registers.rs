use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::cash_registers::{
        CashRegisterList, CashRegisterWithRelations, CashRegisterWithUser,
        OpenCashRegisterRequest, UpdateCashRegisterRequest,
    },
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    response::{ApiResponse, Deleted},
    routes::params::CashRegisterListQuery,
    services::cash_register_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cash_registers).post(open_cash_register))
        .route(
            "/{id}",
            get(get_cash_register)
                .put(update_cash_register)
                .delete(delete_cash_register),
        )
}

#[utoipa::path(
    get,
    path = "/api/cash-registers",
    params(CashRegisterListQuery),
    responses(
        (status = 200, description = "List cash registers with owner and sales", body = ApiResponse<CashRegisterList>),
        (status = 400, description = "Invalid filter"),
    ),
    tag = "Cash registers"
)]
pub async fn list_cash_registers(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CashRegisterListQuery>,
) -> AppResult<Json<ApiResponse<CashRegisterList>>> {
    let resp = cash_register_service::list_cash_registers(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cash-registers/{id}",
    params(("id" = Uuid, Path, description = "Cash register ID")),
    responses(
        (status = 200, description = "Get cash register", body = ApiResponse<CashRegisterWithRelations>),
        (status = 404, description = "Cash register not found"),
    ),
    tag = "Cash registers"
)]
pub async fn get_cash_register(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<CashRegisterWithRelations>>> {
    let resp = cash_register_service::get_cash_register(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cash-registers",
    request_body = OpenCashRegisterRequest,
    responses(
        (status = 201, description = "Open cash register", body = ApiResponse<CashRegisterWithUser>),
        (status = 400, description = "Negative initial amount"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has an open cash register"),
    ),
    tag = "Cash registers"
)]
pub async fn open_cash_register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<OpenCashRegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CashRegisterWithUser>>)> {
    let resp = cash_register_service::open_cash_register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/cash-registers/{id}",
    params(("id" = Uuid, Path, description = "Cash register ID")),
    request_body = UpdateCashRegisterRequest,
    responses(
        (status = 200, description = "Updated cash register", body = ApiResponse<CashRegisterWithUser>),
        (status = 400, description = "Invalid status or negative amount"),
        (status = 404, description = "Cash register not found"),
        (status = 409, description = "Reopening would leave the user with two open registers"),
    ),
    tag = "Cash registers"
)]
pub async fn update_cash_register(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateCashRegisterRequest>,
) -> AppResult<Json<ApiResponse<CashRegisterWithUser>>> {
    let resp = cash_register_service::update_cash_register(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cash-registers/{id}",
    params(("id" = Uuid, Path, description = "Cash register ID")),
    responses(
        (status = 200, description = "Deleted cash register", body = ApiResponse<Deleted>),
        (status = 404, description = "Cash register not found"),
        (status = 409, description = "Cash register has sales"),
    ),
    tag = "Cash registers"
)]
pub async fn delete_cash_register(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = cash_register_service::delete_cash_register(&state, id).await?;
    Ok(Json(resp))
}
