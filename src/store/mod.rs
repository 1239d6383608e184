//! Key-value persistence of the admin collections.
//!
//! [`KeyValueStore`] is the raw string-to-string seam (browser local storage
//! in the storefront itself); [`Repository`] layers typed JSON documents on
//! top of it.

mod error;
pub mod keys;
mod repository;
mod storage;

pub use error::{Result, StoreError};
pub use repository::Repository;
pub use storage::{JsonFileStorage, KeyValueStore, MemoryStorage};
