use uuid::Uuid;

use crate::{
    audit::log_best_effort,
    dto::wishlist::{AddToWishlistRequest, WishlistList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::WishlistItem,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_wishlist(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<WishlistList>> {
    let (page, limit, offset) = pagination.normalize();
    let items = sqlx::query_as::<_, WishlistItem>(
        "SELECT * FROM wishlist_items WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wishlist_items WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Wishlist items",
        WishlistList { items },
        Some(meta),
    ))
}

/// Idempotent: adding a product twice returns the existing row both times
/// with a 200 instead of creating a duplicate (`created` drives the status
/// code in the route).
pub async fn add_to_wishlist(
    state: &AppState,
    user: &AuthUser,
    payload: AddToWishlistRequest,
) -> AppResult<(bool, ApiResponse<WishlistItem>)> {
    let product_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(payload.product_id)
        .fetch_optional(&state.pool)
        .await?;
    if product_exists.is_none() {
        return Err(AppError::validation("product_id", "product does not exist"));
    }

    let existing: Option<WishlistItem> =
        sqlx::query_as("SELECT * FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
            .bind(user.user_id)
            .bind(payload.product_id)
            .fetch_optional(&state.pool)
            .await?;

    if let Some(item) = existing {
        return Ok((
            false,
            ApiResponse::success("Item already in wishlist", item, None),
        ));
    }

    // DO NOTHING + re-select covers a concurrent insert of the same pair.
    let inserted: Option<WishlistItem> = sqlx::query_as(
        r#"
        INSERT INTO wishlist_items (id, user_id, product_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, product_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(payload.product_id)
    .fetch_optional(&state.pool)
    .await?;

    let (created, item) = match inserted {
        Some(item) => (true, item),
        None => {
            let item: WishlistItem =
                sqlx::query_as("SELECT * FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
                    .bind(user.user_id)
                    .bind(payload.product_id)
                    .fetch_one(&state.pool)
                    .await?;
            (false, item)
        }
    };

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "wishlist_add",
        Some("wishlist_items"),
        Some(serde_json::json!({ "product_id": payload.product_id })),
    )
    .await;

    let message = if created {
        "Item added to wishlist"
    } else {
        "Item already in wishlist"
    };
    Ok((created, ApiResponse::success(message, item, None)))
}

pub async fn remove_from_wishlist(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM wishlist_items WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "wishlist_remove",
        Some("wishlist_items"),
        Some(serde_json::json!({ "wishlist_item_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from wishlist",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
