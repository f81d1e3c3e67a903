use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{ColorList, CreateColorRequest, UpdateColorRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Color,
    response::ApiResponse,
    routes::params::Pagination,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_colors).post(create_color))
        .route(
            "/{id}",
            get(get_color).put(update_color).delete(delete_color),
        )
}

#[utoipa::path(
    get,
    path = "/api/colors",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("page_size" = Option<i64>, Query, description = "Items per page, default 10, max 10"),
    ),
    responses(
        (status = 200, description = "List colors", body = ApiResponse<ColorList>)
    ),
    tag = "Colors"
)]
pub async fn list_colors(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ColorList>>> {
    Ok(Json(catalog_service::list_colors(&state, pagination).await?))
}

#[utoipa::path(
    get,
    path = "/api/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    responses(
        (status = 200, description = "Get color", body = ApiResponse<Color>),
        (status = 404, description = "Color not found"),
    ),
    tag = "Colors"
)]
pub async fn get_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Color>>> {
    Ok(Json(catalog_service::get_color(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/colors",
    request_body = CreateColorRequest,
    responses(
        (status = 201, description = "Create color", body = ApiResponse<Color>),
        (status = 400, description = "Duplicate name"),
    ),
    security(("bearer_auth" = [])),
    tag = "Colors"
)]
pub async fn create_color(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateColorRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Color>>)> {
    let resp = catalog_service::create_color(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    request_body = UpdateColorRequest,
    responses(
        (status = 200, description = "Updated color", body = ApiResponse<Color>),
        (status = 404, description = "Color not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Colors"
)]
pub async fn update_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateColorRequest>,
) -> AppResult<Json<ApiResponse<Color>>> {
    Ok(Json(
        catalog_service::update_color(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    responses(
        (status = 200, description = "Deleted color"),
        (status = 404, description = "Color not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Colors"
)]
pub async fn delete_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(catalog_service::delete_color(&state, &user, id).await?))
}
