use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    audit::log_best_effort,
    dto::cart::{AddToCartRequest, CartList, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::CartItem,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::pricing,
    state::AppState,
};

pub async fn list_cart(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CartList>> {
    let (page, limit, offset) = pagination.normalize();
    let items = sqlx::query_as::<_, CartItem>(
        "SELECT * FROM cart_items WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cart_items WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_one(&state.pool)
        .await?;

    // The total covers every line of the cart, not just the current page.
    let all_lines = sqlx::query_as::<_, CartItem>("SELECT * FROM cart_items WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_all(&state.pool)
        .await?;
    let total_value = cart_total(state, &all_lines).await;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Cart items",
        CartList { items, total_value },
        Some(meta),
    ))
}

/// Lines whose variant can no longer be resolved (size detached, color
/// removed or disabled since the line was added) contribute 0 instead of
/// failing the whole total.
async fn cart_total(state: &AppState, lines: &[CartItem]) -> Decimal {
    let mut total = Decimal::ZERO;
    for line in lines {
        match pricing::resolve_unit_price(&state.orm, line.product_id, line.size_id, line.color_id)
            .await
        {
            Ok(unit_price) => total += unit_price * Decimal::from(line.quantity),
            Err(err) => {
                tracing::debug!(cart_item = %line.id, error = %err, "skipping unresolvable cart line");
            }
        }
    }
    total
}

pub async fn get_cart_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<CartItem>> {
    let item: Option<CartItem> =
        sqlx::query_as("SELECT * FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user.user_id)
            .fetch_optional(&state.pool)
            .await?;
    let item = item.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Cart item", item, None))
}

/// Returns `(created, response)`; an existing line for the same
/// (product, size, color) has its quantity incremented instead of a second
/// row being created, and the route answers 200 instead of 201.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<(bool, ApiResponse<CartItem>)> {
    if payload.quantity < 1 {
        return Err(AppError::validation(
            "quantity",
            "quantity must be at least 1",
        ));
    }

    // Resolving validates the selection up front; the price itself is not
    // stored on the line.
    pricing::resolve_unit_price(&state.orm, payload.product_id, payload.size_id, payload.color_id)
        .await?;

    let existing: Option<CartItem> = sqlx::query_as(
        "SELECT * FROM cart_items WHERE user_id = $1 AND product_id = $2 AND size_id = $3 AND color_id = $4",
    )
    .bind(user.user_id)
    .bind(payload.product_id)
    .bind(payload.size_id)
    .bind(payload.color_id)
    .fetch_optional(&state.pool)
    .await?;

    let (created, cart_item) = if let Some(item) = existing {
        let updated = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = quantity + $3
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(user.user_id)
        .bind(payload.quantity)
        .fetch_one(&state.pool)
        .await?;
        (false, updated)
    } else {
        // A concurrent insert for the same tuple lands on the unique
        // constraint; folding it into an increment here keeps the
        // one-line-per-variant rule instead of surfacing a raw conflict.
        let inserted = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (id, user_id, product_id, size_id, color_id, quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, product_id, size_id, color_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.user_id)
        .bind(payload.product_id)
        .bind(payload.size_id)
        .bind(payload.color_id)
        .bind(payload.quantity)
        .fetch_one(&state.pool)
        .await?;
        (true, inserted)
    };

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "cart_add",
        Some("cart_items"),
        Some(serde_json::json!({
            "product_id": payload.product_id,
            "size_id": payload.size_id,
            "color_id": payload.color_id,
            "quantity": payload.quantity,
        })),
    )
    .await;

    let message = if created {
        "Item added to cart"
    } else {
        "Cart item quantity updated"
    };
    Ok((created, ApiResponse::success(message, cart_item, None)))
}

pub async fn update_cart_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    if payload.quantity < 1 {
        return Err(AppError::validation(
            "quantity",
            "quantity must be at least 1",
        ));
    }

    let item: Option<CartItem> = sqlx::query_as(
        r#"
        UPDATE cart_items
        SET quantity = $3
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.user_id)
    .bind(payload.quantity)
    .fetch_optional(&state.pool)
    .await?;

    let item = item.ok_or(AppError::NotFound)?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "cart_update",
        Some("cart_items"),
        Some(serde_json::json!({ "cart_item_id": id, "quantity": payload.quantity })),
    )
    .await;

    Ok(ApiResponse::success("Cart item updated", item, None))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
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
        "cart_remove",
        Some("cart_items"),
        Some(serde_json::json!({ "cart_item_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
