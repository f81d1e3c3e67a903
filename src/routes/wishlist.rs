use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::wishlist::{AddToWishlistRequest, WishlistList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::WishlistItem,
    response::ApiResponse,
    routes::params::Pagination,
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist).post(add_to_wishlist))
        .route("/{id}", axum::routing::delete(remove_from_wishlist))
}

#[utoipa::path(
    get,
    path = "/api/wishlist-items",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("page_size" = Option<i64>, Query, description = "Items per page, default 10, max 10"),
    ),
    responses(
        (status = 200, description = "The caller's wishlist", body = ApiResponse<WishlistList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<WishlistList>>> {
    Ok(Json(
        wishlist_service::list_wishlist(&state, &user, pagination).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/wishlist-items",
    request_body = AddToWishlistRequest,
    responses(
        (status = 201, description = "Added to wishlist", body = ApiResponse<WishlistItem>),
        (status = 200, description = "Already in wishlist", body = ApiResponse<WishlistItem>),
        (status = 400, description = "Product does not exist"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToWishlistRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<WishlistItem>>)> {
    let (created, resp) = wishlist_service::add_to_wishlist(&state, &user, payload).await?;
    let code = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((code, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist-items/{id}",
    params(("id" = Uuid, Path, description = "Wishlist item ID")),
    responses(
        (status = 200, description = "Removed from wishlist"),
        (status = 404, description = "Wishlist item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        wishlist_service::remove_from_wishlist(&state, &user, id).await?,
    ))
}
