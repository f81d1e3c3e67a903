use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CreateSizeRequest, SizeList, UpdateSizeRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Size,
    response::ApiResponse,
    routes::params::Pagination,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sizes).post(create_size))
        .route("/{id}", get(get_size).put(update_size).delete(delete_size))
}

#[utoipa::path(
    get,
    path = "/api/sizes",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("page_size" = Option<i64>, Query, description = "Items per page, default 10, max 10"),
    ),
    responses(
        (status = 200, description = "List sizes", body = ApiResponse<SizeList>)
    ),
    tag = "Sizes"
)]
pub async fn list_sizes(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<SizeList>>> {
    Ok(Json(catalog_service::list_sizes(&state, pagination).await?))
}

#[utoipa::path(
    get,
    path = "/api/sizes/{id}",
    params(("id" = Uuid, Path, description = "Size ID")),
    responses(
        (status = 200, description = "Get size", body = ApiResponse<Size>),
        (status = 404, description = "Size not found"),
    ),
    tag = "Sizes"
)]
pub async fn get_size(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Size>>> {
    Ok(Json(catalog_service::get_size(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/sizes",
    request_body = CreateSizeRequest,
    responses(
        (status = 201, description = "Create size", body = ApiResponse<Size>),
        (status = 400, description = "Size values do not match the declared type"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sizes"
)]
pub async fn create_size(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSizeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Size>>)> {
    let resp = catalog_service::create_size(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/sizes/{id}",
    params(("id" = Uuid, Path, description = "Size ID")),
    request_body = UpdateSizeRequest,
    responses(
        (status = 200, description = "Updated size", body = ApiResponse<Size>),
        (status = 404, description = "Size not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sizes"
)]
pub async fn update_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSizeRequest>,
) -> AppResult<Json<ApiResponse<Size>>> {
    Ok(Json(
        catalog_service::update_size(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/sizes/{id}",
    params(("id" = Uuid, Path, description = "Size ID")),
    responses(
        (status = 200, description = "Deleted size"),
        (status = 404, description = "Size not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sizes"
)]
pub async fn delete_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(catalog_service::delete_size(&state, &user, id).await?))
}
