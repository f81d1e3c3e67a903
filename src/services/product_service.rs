use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_best_effort,
    dto::products::{
        AddImageRequest, AttachColorRequest, AttachSizeRequest, CreateProductRequest,
        ProductColorList, ProductImageList, ProductList, ProductSizeList, UpdateProductRequest,
    },
    entity::{
        brands::Entity as Brands,
        categories::Entity as Categories,
        colors::Entity as Colors,
        product_colors::{
            ActiveModel as ProductColorActive, Column as ProductColorCol, Entity as ProductColors,
            Model as ProductColorModel,
        },
        product_images::{
            ActiveModel as ProductImageActive, Column as ProductImageCol, Entity as ProductImages,
            Model as ProductImageModel,
        },
        product_sizes::{
            ActiveModel as ProductSizeActive, Column as ProductSizeCol, Entity as ProductSizes,
            Model as ProductSizeModel,
        },
        products::{
            ActiveModel as ProductActive, Column as ProductCol, Entity as Products,
            Model as ProductModel,
        },
        sizes::Entity as Sizes,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{self, SizeType},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

/// List products with the optional AND-combined filters: free-text search on
/// the product name, substring match on category/brand name, and an
/// inclusive resolved-price range. A product matches the price range when at
/// least one of its (size, color) combinations resolves into it; products
/// without color rows are matched on the base size price.
pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::col(ProductCol::Name).ilike(pattern));
    }

    if let Some(category) = query.category.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", category);
        condition = condition.add(Expr::cust_with_values(
            "EXISTS (SELECT 1 FROM categories c WHERE c.id = products.category_id AND c.name ILIKE ?)",
            [pattern],
        ));
    }

    if let Some(brand) = query.brand.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", brand);
        condition = condition.add(Expr::cust_with_values(
            "EXISTS (SELECT 1 FROM brands b WHERE b.id = products.brand_id AND b.name ILIKE ?)",
            [pattern],
        ));
    }

    if let Some(price_cond) = price_range_condition(query.min_price, query.max_price) {
        condition = condition.add(price_cond);
    }

    let finder = Products::find()
        .filter(condition)
        .order_by_asc(ProductCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

// One EXISTS over the variant combinations so that both bounds must hold for
// the same combination; two separate predicates could match a product whose
// range straddles the requested one without any combination inside it.
fn price_range_condition(
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
) -> Option<sea_orm::sea_query::SimpleExpr> {
    const RESOLVED: &str = "ps.price + COALESCE(pc.price_modifier, 0)";
    let prefix = "EXISTS (SELECT 1 FROM product_sizes ps \
         LEFT JOIN product_colors pc ON pc.product_id = ps.product_id AND pc.is_available \
         WHERE ps.product_id = products.id AND ";

    match (min_price, max_price) {
        (Some(min), Some(max)) => Some(Expr::cust_with_values(
            format!("{prefix}{RESOLVED} >= ? AND {RESOLVED} <= ?)"),
            [min, max],
        )),
        (Some(min), None) => Some(Expr::cust_with_values(
            format!("{prefix}{RESOLVED} >= ?)"),
            [min],
        )),
        (None, Some(max)) => Some(Expr::cust_with_values(
            format!("{prefix}{RESOLVED} <= ?)"),
            [max],
        )),
        (None, None) => None,
    }
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<models::Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Product",
        product_from_entity(product),
        None,
    ))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<models::Product>> {
    check_product_refs(state, payload.brand_id, payload.category_id).await?;

    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        brand_id: Set(payload.brand_id),
        category_id: Set(payload.category_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<models::Product>> {
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    check_product_refs(state, payload.brand_id, payload.category_id).await?;

    let mut active: ProductActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(brand_id) = payload.brand_id {
        active.brand_id = Set(Some(brand_id));
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(Some(category_id));
    }
    let product = active.update(&state.orm).await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Product updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Product deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- size variants ----

pub async fn list_product_sizes(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<ApiResponse<ProductSizeList>> {
    ensure_product_exists(state, product_id).await?;
    let items = ProductSizes::find()
        .filter(ProductSizeCol::ProductId.eq(product_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_size_from_entity)
        .collect();
    Ok(ApiResponse::success(
        "Product sizes",
        ProductSizeList { items },
        None,
    ))
}

pub async fn attach_size(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    payload: AttachSizeRequest,
) -> AppResult<ApiResponse<models::ProductSize>> {
    if payload.price < Decimal::ZERO {
        return Err(AppError::validation("price", "price must not be negative"));
    }
    if payload.quantity < 0 {
        return Err(AppError::validation(
            "quantity",
            "quantity must not be negative",
        ));
    }

    let product = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let size = Sizes::find_by_id(payload.size_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    // The size-type invariant is checked at write time; a product with no
    // category cannot carry size variants at all.
    let category_id = product
        .category_id
        .ok_or_else(|| AppError::validation("category", "product has no category"))?;
    let category = Categories::find_by_id(category_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if SizeType::parse(&size.size_type)? != SizeType::parse(&category.size_type)? {
        return Err(AppError::VariantMismatch);
    }

    let duplicate = ProductSizes::find()
        .filter(ProductSizeCol::ProductId.eq(product_id))
        .filter(ProductSizeCol::SizeId.eq(payload.size_id))
        .count(&state.orm)
        .await?;
    if duplicate > 0 {
        return Err(AppError::Conflict(
            "this size is already attached to the product".into(),
        ));
    }

    let product_size = ProductSizeActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        size_id: Set(payload.size_id),
        price: Set(payload.price),
        quantity: Set(payload.quantity),
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_size_attach",
        Some("product_sizes"),
        Some(serde_json::json!({ "product_id": product_id, "size_id": payload.size_id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Size attached",
        product_size_from_entity(product_size),
        Some(Meta::empty()),
    ))
}

pub async fn detach_size(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    size_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = ProductSizes::delete_many()
        .filter(ProductSizeCol::ProductId.eq(product_id))
        .filter(ProductSizeCol::SizeId.eq(size_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_size_detach",
        Some("product_sizes"),
        Some(serde_json::json!({ "product_id": product_id, "size_id": size_id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Size detached",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- color variants ----

pub async fn list_product_colors(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<ApiResponse<ProductColorList>> {
    ensure_product_exists(state, product_id).await?;
    let items = ProductColors::find()
        .filter(ProductColorCol::ProductId.eq(product_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_color_from_entity)
        .collect();
    Ok(ApiResponse::success(
        "Product colors",
        ProductColorList { items },
        None,
    ))
}

pub async fn attach_color(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    payload: AttachColorRequest,
) -> AppResult<ApiResponse<models::ProductColor>> {
    ensure_product_exists(state, product_id).await?;
    Colors::find_by_id(payload.color_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let duplicate = ProductColors::find()
        .filter(ProductColorCol::ProductId.eq(product_id))
        .filter(ProductColorCol::ColorId.eq(payload.color_id))
        .count(&state.orm)
        .await?;
    if duplicate > 0 {
        return Err(AppError::Conflict(
            "this color is already attached to the product".into(),
        ));
    }

    let product_color = ProductColorActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        color_id: Set(payload.color_id),
        price_modifier: Set(payload.price_modifier),
        is_available: Set(payload.is_available),
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_color_attach",
        Some("product_colors"),
        Some(serde_json::json!({ "product_id": product_id, "color_id": payload.color_id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Color attached",
        product_color_from_entity(product_color),
        Some(Meta::empty()),
    ))
}

pub async fn detach_color(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    color_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = ProductColors::delete_many()
        .filter(ProductColorCol::ProductId.eq(product_id))
        .filter(ProductColorCol::ColorId.eq(color_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_color_detach",
        Some("product_colors"),
        Some(serde_json::json!({ "product_id": product_id, "color_id": color_id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Color detached",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- images ----

pub async fn list_product_images(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<ApiResponse<ProductImageList>> {
    ensure_product_exists(state, product_id).await?;
    let items = ProductImages::find()
        .filter(ProductImageCol::ProductId.eq(product_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_image_from_entity)
        .collect();
    Ok(ApiResponse::success(
        "Product images",
        ProductImageList { items },
        None,
    ))
}

pub async fn add_image(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    payload: AddImageRequest,
) -> AppResult<ApiResponse<models::ProductImage>> {
    ensure_product_exists(state, product_id).await?;
    if let Some(color_id) = payload.color_id {
        Colors::find_by_id(color_id)
            .one(&state.orm)
            .await?
            .ok_or(AppError::NotFound)?;
    }

    // "One primary image per product/color" is a convention here, not a
    // constraint.
    let image = ProductImageActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        color_id: Set(payload.color_id),
        url: Set(payload.url),
        is_primary: Set(payload.is_primary),
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_image_add",
        Some("product_images"),
        Some(serde_json::json!({ "product_id": product_id, "image_id": image.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Image added",
        product_image_from_entity(image),
        Some(Meta::empty()),
    ))
}

pub async fn delete_image(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    image_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = ProductImages::delete_many()
        .filter(ProductImageCol::ProductId.eq(product_id))
        .filter(ProductImageCol::Id.eq(image_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "product_image_delete",
        Some("product_images"),
        Some(serde_json::json!({ "product_id": product_id, "image_id": image_id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Image deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- helpers ----

async fn ensure_product_exists(state: &AppState, product_id: Uuid) -> AppResult<()> {
    Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(())
}

async fn check_product_refs(
    state: &AppState,
    brand_id: Option<Uuid>,
    category_id: Option<Uuid>,
) -> AppResult<()> {
    if let Some(brand_id) = brand_id {
        if Brands::find_by_id(brand_id).one(&state.orm).await?.is_none() {
            return Err(AppError::validation("brand_id", "brand does not exist"));
        }
    }
    if let Some(category_id) = category_id {
        if Categories::find_by_id(category_id)
            .one(&state.orm)
            .await?
            .is_none()
        {
            return Err(AppError::validation(
                "category_id",
                "category does not exist",
            ));
        }
    }
    Ok(())
}

fn product_from_entity(model: ProductModel) -> models::Product {
    models::Product {
        id: model.id,
        name: model.name,
        description: model.description,
        brand_id: model.brand_id,
        category_id: model.category_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn product_size_from_entity(model: ProductSizeModel) -> models::ProductSize {
    models::ProductSize {
        id: model.id,
        product_id: model.product_id,
        size_id: model.size_id,
        price: model.price,
        quantity: model.quantity,
    }
}

fn product_color_from_entity(model: ProductColorModel) -> models::ProductColor {
    models::ProductColor {
        id: model.id,
        product_id: model.product_id,
        color_id: model.color_id,
        price_modifier: model.price_modifier,
        is_available: model.is_available,
    }
}

fn product_image_from_entity(model: ProductImageModel) -> models::ProductImage {
    models::ProductImage {
        id: model.id,
        product_id: model.product_id,
        color_id: model.color_id,
        url: model.url,
        is_primary: model.is_primary,
    }
}
