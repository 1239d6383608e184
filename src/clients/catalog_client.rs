use crate::actor_framework::ResourceClient;
use crate::domain::{Brand, Category, Product};

/// Client for the category collection. Every mutation republishes the
/// storefront's category snapshot.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl_basic_client!(
    CategoryClient,
    Category,
    create_category,
    get_category,
    list_categories,
    update_category,
    delete_category
);

#[derive(Clone)]
pub struct BrandClient {
    inner: ResourceClient<Brand>,
}

impl_basic_client!(BrandClient, Brand, create_brand, get_brand, list_brands, update_brand, delete_brand);

#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(
    ProductClient,
    Product,
    create_product,
    get_product,
    list_products,
    update_product,
    delete_product
);
