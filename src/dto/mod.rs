pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod wishlist;
