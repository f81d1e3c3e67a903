use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_best_effort,
    dto::orders::{CreateOrderRequest, OrderList, UpdateOrderRequest},
    entity::orders::{
        ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{self, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    services::pricing,
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination.normalize();
    // Always scoped to the caller; orders are never listed cross-user.
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let finder = Orders::find()
        .filter(condition)
        .order_by_desc(OrderCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<models::Order>> {
    let order = find_owned(state, user, id).await?;
    Ok(ApiResponse::success("Order", order_from_entity(order)?, None))
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<models::Order>> {
    if payload.quantity < 1 {
        return Err(AppError::validation(
            "quantity",
            "quantity must be at least 1",
        ));
    }

    // Snapshot the resolved price so later catalog edits never change what
    // the customer agreed to pay.
    let unit_price = pricing::resolve_unit_price(
        &state.orm,
        payload.product_id,
        payload.size_id,
        payload.color_id,
    )
    .await?;
    let total_price = unit_price * rust_decimal::Decimal::from(payload.quantity);

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        product_id: Set(payload.product_id),
        size_id: Set(payload.size_id),
        color_id: Set(payload.color_id),
        quantity: Set(payload.quantity),
        unit_price: Set(unit_price),
        total_price: Set(total_price),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        order_from_entity(order)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<models::Order>> {
    let existing = find_owned(state, user, id).await?;
    let current = OrderStatus::parse(&existing.status)?;

    // Once shipped or delivered nothing may change, not just the status.
    if current.is_locked() {
        return Err(AppError::StateLocked(
            "order has been shipped or delivered".into(),
        ));
    }

    if let Some(next) = payload.status {
        if !current.can_transition(next) {
            return Err(AppError::StateLocked(format!(
                "cannot move order from '{}' to '{}'",
                current.as_str(),
                next.as_str()
            )));
        }
    }
    if let Some(quantity) = payload.quantity {
        if quantity < 1 {
            return Err(AppError::validation(
                "quantity",
                "quantity must be at least 1",
            ));
        }
    }

    let unit_price = existing.unit_price;
    let mut active: OrderActive = existing.into();
    if let Some(next) = payload.status {
        active.status = Set(next.as_str().to_string());
    }
    if let Some(quantity) = payload.quantity {
        // The total always follows the snapshotted unit price, never the
        // current catalog price.
        active.quantity = Set(quantity);
        active.total_price = Set(unit_price * rust_decimal::Decimal::from(quantity));
    }
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "order_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status })),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = find_owned(state, user, id).await?;
    let current = OrderStatus::parse(&existing.status)?;

    if !current.is_deletable() {
        return Err(AppError::StateLocked(
            "order is already being processed or completed".into(),
        ));
    }

    Orders::delete_by_id(id).exec(&state.orm).await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "order_delete",
        Some("orders"),
        Some(serde_json::json!({ "order_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Order cancelled",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// Scoping the lookup by owner means a foreign order id reads as NotFound,
// never as Forbidden, so ids cannot be probed.
async fn find_owned(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<OrderModel> {
    Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::Id.eq(id))
                .add(OrderCol::UserId.eq(user.user_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

fn order_from_entity(model: OrderModel) -> AppResult<models::Order> {
    Ok(models::Order {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        size_id: model.size_id,
        color_id: model.color_id,
        quantity: model.quantity,
        unit_price: model.unit_price,
        total_price: model.total_price,
        status: OrderStatus::parse(&model.status)?,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
