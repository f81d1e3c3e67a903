use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod brands;
pub mod cart;
pub mod categories;
pub mod colors;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod reviews;
pub mod sizes;
pub mod wishlist;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/brands", brands::router())
        .nest("/sizes", sizes::router())
        .nest("/colors", colors::router())
        .nest("/reviews", reviews::router())
        .nest("/orders", orders::router())
        .nest("/cart-items", cart::router())
        .nest("/wishlist-items", wishlist::router())
}
