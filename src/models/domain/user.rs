use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::new_id;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String, // Stored trimmed and lower-cased
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, email: &str, password_hash: String) -> Self {
        User {
            id: new_id(),
            username: username.trim().to_string(),
            email: normalize_email(email),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("johndoe", "John@Example.com ", "hash".to_string());

        assert_eq!(user.username, "johndoe");
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.password_hash, "hash");
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_users_get_distinct_ids() {
        let a = User::new("a_user", "a@example.com", String::new());
        let b = User::new("b_user", "b@example.com", String::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_user_round_trips_through_json() {
        let user = User::new("alice", "alice@example.com", "hash".to_string());
        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, parsed);
    }
}
