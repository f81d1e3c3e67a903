pub mod audit_logs;
pub mod brands;
pub mod cart_items;
pub mod categories;
pub mod colors;
pub mod orders;
pub mod product_colors;
pub mod product_images;
pub mod product_sizes;
pub mod products;
pub mod reviews;
pub mod sizes;
pub mod users;
pub mod wishlist_items;

pub use audit_logs::Entity as AuditLogs;
pub use brands::Entity as Brands;
pub use cart_items::Entity as CartItems;
pub use categories::Entity as Categories;
pub use colors::Entity as Colors;
pub use orders::Entity as Orders;
pub use product_colors::Entity as ProductColors;
pub use product_images::Entity as ProductImages;
pub use product_sizes::Entity as ProductSizes;
pub use products::Entity as Products;
pub use reviews::Entity as Reviews;
pub use sizes::Entity as Sizes;
pub use users::Entity as Users;
pub use wishlist_items::Entity as WishlistItems;
