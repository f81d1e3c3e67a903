use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Brand, Category, Color, Size, SizeType};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub size_type: SizeType,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub size_type: Option<SizeType>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBrandRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBrandRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSizeRequest {
    pub size_type: SizeType,
    pub numeric_size: Option<i32>,
    pub alpha_size: Option<String>,
    pub custom_size: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSizeRequest {
    pub size_type: Option<SizeType>,
    pub numeric_size: Option<i32>,
    pub alpha_size: Option<String>,
    pub custom_size: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateColorRequest {
    pub name: String,
    pub hex_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateColorRequest {
    pub name: Option<String>,
    pub hex_code: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct BrandList {
    #[schema(value_type = Vec<Brand>)]
    pub items: Vec<Brand>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SizeList {
    #[schema(value_type = Vec<Size>)]
    pub items: Vec<Size>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ColorList {
    #[schema(value_type = Vec<Color>)]
    pub items: Vec<Color>,
}
