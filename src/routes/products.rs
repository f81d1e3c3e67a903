use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::products::{
        AddImageRequest, AttachColorRequest, AttachSizeRequest, CreateProductRequest,
        ProductColorList, ProductImageList, ProductList, ProductSizeList, UpdateProductRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Product, ProductColor, ProductImage, ProductSize},
    response::ApiResponse,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/sizes", get(list_sizes).post(attach_size))
        .route("/{id}/sizes/{size_id}", delete(detach_size))
        .route("/{id}/colors", get(list_colors).post(attach_color))
        .route("/{id}/colors/{color_id}", delete(detach_color))
        .route("/{id}/images", get(list_images).post(add_image))
        .route("/{id}/images/{image_id}", delete(delete_image))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("page_size" = Option<i64>, Query, description = "Items per page, default 10, max 10"),
        ("category" = Option<String>, Query, description = "Substring match on category name"),
        ("brand" = Option<String>, Query, description = "Substring match on brand name"),
        ("min_price" = Option<f64>, Query, description = "Inclusive lower bound on resolved price"),
        ("max_price" = Option<f64>, Query, description = "Inclusive upper bound on resolved price"),
        ("search" = Option<String>, Query, description = "Substring match on product name"),
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(product_service::list_products(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(product_service::get_product(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    Ok(Json(
        product_service::update_product(&state, &user, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        product_service::delete_product(&state, &user, id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/sizes",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Size variants", body = ApiResponse<ProductSizeList>)
    ),
    tag = "Products"
)]
pub async fn list_sizes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductSizeList>>> {
    Ok(Json(product_service::list_product_sizes(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/sizes",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = AttachSizeRequest,
    responses(
        (status = 201, description = "Size attached", body = ApiResponse<ProductSize>),
        (status = 400, description = "Size type mismatch or validation failure"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn attach_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttachSizeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductSize>>)> {
    let resp = product_service::attach_size(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}/sizes/{size_id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("size_id" = Uuid, Path, description = "Size ID"),
    ),
    responses((status = 200, description = "Size detached")),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn detach_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, size_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        product_service::detach_size(&state, &user, id, size_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/colors",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Color variants", body = ApiResponse<ProductColorList>)
    ),
    tag = "Products"
)]
pub async fn list_colors(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductColorList>>> {
    Ok(Json(product_service::list_product_colors(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/colors",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = AttachColorRequest,
    responses(
        (status = 201, description = "Color attached", body = ApiResponse<ProductColor>),
        (status = 400, description = "Validation failure"),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn attach_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttachColorRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductColor>>)> {
    let resp = product_service::attach_color(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}/colors/{color_id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("color_id" = Uuid, Path, description = "Color ID"),
    ),
    responses((status = 200, description = "Color detached")),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn detach_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, color_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        product_service::detach_color(&state, &user, id, color_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/images",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product images", body = ApiResponse<ProductImageList>)
    ),
    tag = "Products"
)]
pub async fn list_images(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductImageList>>> {
    Ok(Json(product_service::list_product_images(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/images",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = AddImageRequest,
    responses(
        (status = 201, description = "Image added", body = ApiResponse<ProductImage>),
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn add_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddImageRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductImage>>)> {
    let resp = product_service::add_image(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}/images/{image_id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("image_id" = Uuid, Path, description = "Image ID"),
    ),
    responses((status = 200, description = "Image deleted")),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        product_service::delete_image(&state, &user, id, image_id).await?,
    ))
}
