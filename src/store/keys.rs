//! Storage key names shared with the storefront.

pub const CATEGORIES: &str = "categories";
pub const BRANDS: &str = "brands";
pub const ADMIN_PRODUCTS: &str = "adminProducts";
pub const ORDERS: &str = "orders";
pub const USERS: &str = "users";
pub const WEBSITE_CATEGORIES: &str = "websiteCategories";
pub const WEBSITE_PRODUCTS: &str = "products";
pub const PREVENT_SAMPLE_DATA: &str = "preventSampleData";
pub const ADMIN_SESSION: &str = "adminUser";
pub const CURRENT_USER: &str = "currentUser";

const ORDER_HISTORY_PREFIX: &str = "orderHistory_";

/// Key of the per-user order history mirror.
pub fn order_history(username: &str) -> String {
    format!("{ORDER_HISTORY_PREFIX}{username}")
}
