//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use grapevine_core::{UserId, Username};

/// A stored account (domain type).
///
/// The password hash lives only in the `app_user` row and the auth service;
/// it is never part of this type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Account name, unique across the store.
    pub username: Username,
    /// Whether this account has administrator rights.
    pub is_admin: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Public view of an account: everything login, registration, and user
/// lookup are allowed to return.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username.into_inner(),
            is_admin: user.is_admin,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_response_exposes_no_credential_material() {
        let user = User {
            id: UserId::generate(),
            username: Username::parse("alice").unwrap(),
            is_admin: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("id"));
        assert!(object.contains_key("username"));
        assert!(object.contains_key("isAdmin"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
    }
}
