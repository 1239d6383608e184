use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

/// A registered storefront account. Read-only from the admin side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl User {
    pub fn new(username: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            role: role.into(),
        }
    }

    /// Customers are every account that is not an administrator.
    pub fn is_customer(&self) -> bool {
        self.username != ADMIN_ROLE && self.role != ADMIN_ROLE
    }

    /// Name shown in listings, falling back to the username.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}
