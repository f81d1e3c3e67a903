use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Default page size is 10, and 10 is also the hard ceiling: a larger
/// `page_size` is accepted but clamped, never honored.
pub const MAX_PAGE_SIZE: i64 = 10;

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(MAX_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;
        (page, page_size, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Substring match on the category name.
    pub category: Option<String>,
    /// Substring match on the brand name.
    pub brand: Option<String>,
    /// Inclusive lower bound on the resolved variant price.
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on the resolved variant price.
    pub max_price: Option<Decimal>,
    /// Substring match on the product name.
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub product: Option<Uuid>,
    pub rating: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_clamped_to_the_ceiling() {
        let p = Pagination {
            page: Some(2),
            page_size: Some(100),
        };
        assert_eq!(p.normalize(), (2, 10, 10));
    }

    #[test]
    fn defaults_apply_when_absent() {
        let p = Pagination {
            page: None,
            page_size: None,
        };
        assert_eq!(p.normalize(), (1, 10, 0));
    }

    #[test]
    fn nonsense_values_are_normalized() {
        let p = Pagination {
            page: Some(0),
            page_size: Some(-5),
        };
        assert_eq!(p.normalize(), (1, 1, 0));
    }
}
