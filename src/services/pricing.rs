//! Variant resolution: match a (product, size, color) selection to its
//! variant rows and compute the effective unit price.

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity::{
        categories::Entity as Categories,
        product_colors::{Column as ProductColorCol, Entity as ProductColors},
        product_sizes::{Column as ProductSizeCol, Entity as ProductSizes},
        products::Entity as Products,
        sizes::Entity as Sizes,
    },
    error::{AppError, AppResult},
    models::SizeType,
};

/// Everything needed to price one variant, already fetched.
#[derive(Debug, Clone, Copy)]
pub struct VariantRows {
    pub category_size_type: SizeType,
    pub size_type: SizeType,
    pub base_price: Decimal,
    pub price_modifier: Decimal,
    pub color_available: bool,
}

/// Pure pricing rule: size type must match the category, the color must be
/// available, unit price = base price + color modifier. A large negative
/// modifier can push the result below zero; that is intentionally not
/// clamped.
pub fn resolve(rows: &VariantRows) -> AppResult<Decimal> {
    if rows.size_type != rows.category_size_type {
        return Err(AppError::VariantMismatch);
    }
    if !rows.color_available {
        return Err(AppError::VariantUnavailable);
    }
    Ok(rows.base_price + rows.price_modifier)
}

/// Resolve the effective unit price for a (product, size, color) selection.
/// Pure read; no rows are touched.
pub async fn resolve_unit_price<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    size_id: Uuid,
    color_id: Uuid,
) -> AppResult<Decimal> {
    let product = Products::find_by_id(product_id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    // A product without a category cannot satisfy the size-type invariant.
    let category_id = product.category_id.ok_or(AppError::VariantMismatch)?;
    let category = Categories::find_by_id(category_id)
        .one(conn)
        .await?
        .ok_or(AppError::VariantMismatch)?;
    let category_size_type = SizeType::parse(&category.size_type)?;

    let size = Sizes::find_by_id(size_id)
        .one(conn)
        .await?
        .ok_or(AppError::VariantNotFound)?;
    let size_type = SizeType::parse(&size.size_type)?;

    let product_size = ProductSizes::find()
        .filter(ProductSizeCol::ProductId.eq(product_id))
        .filter(ProductSizeCol::SizeId.eq(size_id))
        .one(conn)
        .await?
        .ok_or(AppError::VariantNotFound)?;

    let product_color = ProductColors::find()
        .filter(ProductColorCol::ProductId.eq(product_id))
        .filter(ProductColorCol::ColorId.eq(color_id))
        .one(conn)
        .await?
        .ok_or(AppError::VariantNotFound)?;

    resolve(&VariantRows {
        category_size_type,
        size_type,
        base_price: product_size.price,
        price_modifier: product_color.price_modifier,
        color_available: product_color.is_available,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rows() -> VariantRows {
        VariantRows {
            category_size_type: SizeType::Numeric,
            size_type: SizeType::Numeric,
            base_price: dec("100.00"),
            price_modifier: dec("-10.00"),
            color_available: true,
        }
    }

    #[test]
    fn base_price_plus_modifier() {
        assert_eq!(resolve(&rows()).unwrap(), dec("90.00"));
    }

    #[test]
    fn unavailable_color_is_rejected() {
        let r = VariantRows {
            color_available: false,
            ..rows()
        };
        assert!(matches!(resolve(&r), Err(AppError::VariantUnavailable)));
    }

    #[test]
    fn size_type_mismatch_is_rejected() {
        let r = VariantRows {
            size_type: SizeType::Alpha,
            ..rows()
        };
        assert!(matches!(resolve(&r), Err(AppError::VariantMismatch)));
    }

    #[test]
    fn negative_result_is_not_clamped() {
        // A modifier larger than the base price yields a negative unit
        // price. Known behavior, kept as-is.
        let r = VariantRows {
            base_price: dec("5.00"),
            price_modifier: dec("-10.00"),
            ..rows()
        };
        assert_eq!(resolve(&r).unwrap(), dec("-5.00"));
    }
}
