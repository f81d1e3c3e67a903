//! CRUD for the catalog leaf entities: categories, brands, sizes, colors.
//! Reads are open; writes only require an authenticated caller. Catalog
//! writes are deliberately not gated on a role.

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_best_effort,
    dto::catalog::{
        BrandList, CategoryList, ColorList, CreateBrandRequest, CreateCategoryRequest,
        CreateColorRequest, CreateSizeRequest, SizeList, UpdateBrandRequest,
        UpdateCategoryRequest, UpdateColorRequest, UpdateSizeRequest,
    },
    entity::{
        brands::{
            ActiveModel as BrandActive, Column as BrandCol, Entity as Brands,
            Model as BrandModel,
        },
        categories::{
            ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories,
            Model as CategoryModel,
        },
        colors::{
            ActiveModel as ColorActive, Column as ColorCol, Entity as Colors,
            Model as ColorModel,
        },
        sizes::{ActiveModel as SizeActive, Column as SizeCol, Entity as Sizes, Model as SizeModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{self, validate_size_values, SizeType},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

// ---- categories ----

pub async fn list_categories(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CategoryList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Categories::find().order_by_asc(CategoryCol::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(meta),
    ))
}

pub async fn get_category(state: &AppState, id: Uuid) -> AppResult<ApiResponse<models::Category>> {
    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Category",
        category_from_entity(category)?,
        None,
    ))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<models::Category>> {
    ensure_unique_name(
        Categories::find().filter(CategoryCol::Name.eq(payload.name.clone())),
        state,
        "category",
    )
    .await?;

    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        size_type: Set(payload.size_type.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "category_create",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<models::Category>> {
    let existing = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: CategoryActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(size_type) = payload.size_type {
        active.size_type = Set(size_type.as_str().to_string());
    }
    let category = active.update(&state.orm).await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "category_update",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Category updated",
        category_from_entity(category)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "category_delete",
        Some("categories"),
        Some(serde_json::json!({ "category_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Category deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- brands ----

pub async fn list_brands(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<BrandList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Brands::find().order_by_asc(BrandCol::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(brand_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Brands", BrandList { items }, Some(meta)))
}

pub async fn get_brand(state: &AppState, id: Uuid) -> AppResult<ApiResponse<models::Brand>> {
    let brand = Brands::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Brand", brand_from_entity(brand), None))
}

pub async fn create_brand(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBrandRequest,
) -> AppResult<ApiResponse<models::Brand>> {
    ensure_unique_name(
        Brands::find().filter(BrandCol::Name.eq(payload.name.clone())),
        state,
        "brand",
    )
    .await?;

    let brand = BrandActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "brand_create",
        Some("brands"),
        Some(serde_json::json!({ "brand_id": brand.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Brand created",
        brand_from_entity(brand),
        Some(Meta::empty()),
    ))
}

pub async fn update_brand(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBrandRequest,
) -> AppResult<ApiResponse<models::Brand>> {
    let existing = Brands::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: BrandActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    let brand = active.update(&state.orm).await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "brand_update",
        Some("brands"),
        Some(serde_json::json!({ "brand_id": brand.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Brand updated",
        brand_from_entity(brand),
        Some(Meta::empty()),
    ))
}

pub async fn delete_brand(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Brands::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "brand_delete",
        Some("brands"),
        Some(serde_json::json!({ "brand_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Brand deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- sizes ----

pub async fn list_sizes(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<SizeList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Sizes::find()
        .order_by_asc(SizeCol::NumericSize)
        .order_by_asc(SizeCol::AlphaSize)
        .order_by_asc(SizeCol::CustomSize);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(size_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Sizes", SizeList { items }, Some(meta)))
}

pub async fn get_size(state: &AppState, id: Uuid) -> AppResult<ApiResponse<models::Size>> {
    let size = Sizes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Size", size_from_entity(size)?, None))
}

pub async fn create_size(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSizeRequest,
) -> AppResult<ApiResponse<models::Size>> {
    validate_size_values(
        payload.size_type,
        payload.numeric_size,
        payload.alpha_size.as_deref(),
        payload.custom_size.as_deref(),
    )?;

    let size = SizeActive {
        id: Set(Uuid::new_v4()),
        size_type: Set(payload.size_type.as_str().to_string()),
        numeric_size: Set(payload.numeric_size),
        alpha_size: Set(payload.alpha_size),
        custom_size: Set(payload.custom_size),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "size_create",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": size.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Size created",
        size_from_entity(size)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_size(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSizeRequest,
) -> AppResult<ApiResponse<models::Size>> {
    let existing = Sizes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let size_type = match payload.size_type {
        Some(t) => t,
        None => SizeType::parse(&existing.size_type)?,
    };

    // An explicit type change resets the stored value columns; merging the
    // old value back in would always trip the one-populated-value check, so
    // the caller must supply the value for the new type in the same request.
    let type_changed = size_type.as_str() != existing.size_type;
    let numeric_size = payload
        .numeric_size
        .or(if type_changed { None } else { existing.numeric_size });
    let alpha_size = payload.alpha_size.clone().or_else(|| {
        if type_changed {
            None
        } else {
            existing.alpha_size.clone()
        }
    });
    let custom_size = payload.custom_size.clone().or_else(|| {
        if type_changed {
            None
        } else {
            existing.custom_size.clone()
        }
    });

    // The merged result must still hold the one-populated-value invariant,
    // so a size cannot drift into an incoherent state through partial
    // updates.
    validate_size_values(
        size_type,
        numeric_size,
        alpha_size.as_deref(),
        custom_size.as_deref(),
    )?;

    let mut active: SizeActive = existing.into();
    active.size_type = Set(size_type.as_str().to_string());
    active.numeric_size = Set(numeric_size);
    active.alpha_size = Set(alpha_size);
    active.custom_size = Set(custom_size);
    let size = active.update(&state.orm).await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "size_update",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": size.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Size updated",
        size_from_entity(size)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_size(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Sizes::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "size_delete",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Size deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- colors ----

pub async fn list_colors(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ColorList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Colors::find().order_by_asc(ColorCol::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(color_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Colors", ColorList { items }, Some(meta)))
}

pub async fn get_color(state: &AppState, id: Uuid) -> AppResult<ApiResponse<models::Color>> {
    let color = Colors::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Color", color_from_entity(color), None))
}

pub async fn create_color(
    state: &AppState,
    user: &AuthUser,
    payload: CreateColorRequest,
) -> AppResult<ApiResponse<models::Color>> {
    ensure_unique_name(
        Colors::find().filter(ColorCol::Name.eq(payload.name.clone())),
        state,
        "color",
    )
    .await?;

    let color = ColorActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        hex_code: Set(payload.hex_code),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "color_create",
        Some("colors"),
        Some(serde_json::json!({ "color_id": color.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Color created",
        color_from_entity(color),
        Some(Meta::empty()),
    ))
}

pub async fn update_color(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateColorRequest,
) -> AppResult<ApiResponse<models::Color>> {
    let existing = Colors::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ColorActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(hex_code) = payload.hex_code {
        active.hex_code = Set(Some(hex_code));
    }
    let color = active.update(&state.orm).await?;

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "color_update",
        Some("colors"),
        Some(serde_json::json!({ "color_id": color.id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Color updated",
        color_from_entity(color),
        Some(Meta::empty()),
    ))
}

pub async fn delete_color(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Colors::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    log_best_effort(
        &state.pool,
        Some(user.user_id),
        "color_delete",
        Some("colors"),
        Some(serde_json::json!({ "color_id": id })),
    )
    .await;

    Ok(ApiResponse::success(
        "Color deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

// ---- helpers ----

async fn ensure_unique_name<E>(
    finder: sea_orm::Select<E>,
    state: &AppState,
    entity_name: &str,
) -> AppResult<()>
where
    E: EntityTrait,
    E::Model: Sync,
{
    if finder.count(&state.orm).await? > 0 {
        return Err(AppError::Conflict(format!(
            "a {entity_name} with this name already exists"
        )));
    }
    Ok(())
}

fn category_from_entity(model: CategoryModel) -> AppResult<models::Category> {
    Ok(models::Category {
        id: model.id,
        name: model.name,
        description: model.description,
        size_type: SizeType::parse(&model.size_type)?,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn brand_from_entity(model: BrandModel) -> models::Brand {
    models::Brand {
        id: model.id,
        name: model.name,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn size_from_entity(model: SizeModel) -> AppResult<models::Size> {
    Ok(models::Size {
        id: model.id,
        size_type: SizeType::parse(&model.size_type)?,
        numeric_size: model.numeric_size,
        alpha_size: model.alpha_size,
        custom_size: model.custom_size,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn color_from_entity(model: ColorModel) -> models::Color {
    models::Color {
        id: model.id,
        name: model.name,
        hex_code: model.hex_code,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
