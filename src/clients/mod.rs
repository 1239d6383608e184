#[macro_use]
mod macros;

mod catalog_client;
mod order_client;
mod stats_client;
mod sync_client;

pub use catalog_client::{BrandClient, CategoryClient, ProductClient};
pub use order_client::OrderClient;
pub use stats_client::StatsClient;
pub use sync_client::SyncClient;
