use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, ProductColor, ProductImage, ProductSize};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// Attach a size variant to a product with its base price and stock.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachSizeRequest {
    pub size_id: Uuid,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i32,
}

/// Attach a color variant with a signed price modifier.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachColorRequest {
    pub color_id: Uuid,
    #[serde(default)]
    pub price_modifier: Decimal,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddImageRequest {
    pub url: String,
    pub color_id: Option<Uuid>,
    #[serde(default)]
    pub is_primary: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductSizeList {
    #[schema(value_type = Vec<ProductSize>)]
    pub items: Vec<ProductSize>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductColorList {
    #[schema(value_type = Vec<ProductColor>)]
    pub items: Vec<ProductColor>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductImageList {
    #[schema(value_type = Vec<ProductImage>)]
    pub items: Vec<ProductImage>,
}
