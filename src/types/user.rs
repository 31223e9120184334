//! User types

use serde::{Deserialize, Serialize};

/// A user account on the server
///
/// Only the fields the export needs are kept; users are never modified once
/// fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this user
    pub id: String,
    /// Username (unique login name)
    pub username: String,
}

impl User {
    /// Create a new user
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        User {
            id: id.into(),
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("user-1", "alice");
        assert_eq!(user.id, "user-1");
        assert_eq!(user.username, "alice");
    }
}
