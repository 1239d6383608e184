use serde::{Deserialize, Serialize};

/// A product category. `value` is the slug that products reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub value: String,
}

/// Payload for creating a new category.
#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
}

/// Payload for renaming a category. The slug is left untouched.
#[derive(Debug, Clone)]
pub struct CategoryPatch {
    pub name: String,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Lower-cases `name` and joins its whitespace-separated words with `-`.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
