use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, CartList, UpdateCartItemRequest},
        catalog::{
            BrandList, CategoryList, ColorList, CreateBrandRequest, CreateCategoryRequest,
            CreateColorRequest, CreateSizeRequest, SizeList, UpdateBrandRequest,
            UpdateCategoryRequest, UpdateColorRequest, UpdateSizeRequest,
        },
        orders::{CreateOrderRequest, OrderList, UpdateOrderRequest},
        products::{
            AddImageRequest, AttachColorRequest, AttachSizeRequest, CreateProductRequest,
            ProductColorList, ProductImageList, ProductList, ProductSizeList,
            UpdateProductRequest,
        },
        reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
        wishlist::{AddToWishlistRequest, WishlistList},
    },
    models::{
        Brand, CartItem, Category, Color, Order, OrderStatus, Product, ProductColor,
        ProductImage, ProductSize, Review, Size, SizeType, User, WishlistItem,
    },
    response::{ApiResponse, Meta},
    routes::{
        auth, brands, cart, categories, colors, health, orders, params,
        products as product_routes, reviews, sizes, wishlist,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        product_routes::list_products,
        product_routes::get_product,
        product_routes::create_product,
        product_routes::update_product,
        product_routes::delete_product,
        product_routes::list_sizes,
        product_routes::attach_size,
        product_routes::detach_size,
        product_routes::list_colors,
        product_routes::attach_color,
        product_routes::detach_color,
        product_routes::list_images,
        product_routes::add_image,
        product_routes::delete_image,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        brands::list_brands,
        brands::get_brand,
        brands::create_brand,
        brands::update_brand,
        brands::delete_brand,
        sizes::list_sizes,
        sizes::get_size,
        sizes::create_size,
        sizes::update_size,
        sizes::delete_size,
        colors::list_colors,
        colors::get_color,
        colors::create_color,
        colors::update_color,
        colors::delete_color,
        reviews::list_reviews,
        reviews::get_review,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        orders::delete_order,
        cart::list_cart,
        cart::list_cart_item,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist
    ),
    components(
        schemas(
            User,
            Category,
            Brand,
            Size,
            Color,
            Product,
            ProductSize,
            ProductColor,
            ProductImage,
            Review,
            Order,
            CartItem,
            WishlistItem,
            SizeType,
            OrderStatus,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CreateBrandRequest,
            UpdateBrandRequest,
            CreateSizeRequest,
            UpdateSizeRequest,
            CreateColorRequest,
            UpdateColorRequest,
            CreateProductRequest,
            UpdateProductRequest,
            AttachSizeRequest,
            AttachColorRequest,
            AddImageRequest,
            CreateReviewRequest,
            UpdateReviewRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            AddToCartRequest,
            UpdateCartItemRequest,
            AddToWishlistRequest,
            CategoryList,
            BrandList,
            SizeList,
            ColorList,
            ProductList,
            ProductSizeList,
            ProductColorList,
            ProductImageList,
            ReviewList,
            OrderList,
            CartList,
            WishlistList,
            params::Pagination,
            params::ProductQuery,
            params::ReviewQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderList>,
            ApiResponse<CartList>,
            ApiResponse<WishlistList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Products", description = "Product and variant endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Brands", description = "Brand endpoints"),
        (name = "Sizes", description = "Size endpoints"),
        (name = "Colors", description = "Color endpoints"),
        (name = "Reviews", description = "Review endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
