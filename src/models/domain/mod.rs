pub mod question;
pub mod quiz;
pub mod user;

pub use question::{AnswerOption, Question};
pub use quiz::Quiz;
pub use user::User;

/// Incoming child ids equal to this (or absent/empty) denote a new entity.
pub const NEW_ENTITY_ID: &str = "0";

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Returns the id only when it refers to an already persisted entity.
pub fn persisted_id(id: Option<&str>) -> Option<&str> {
    id.map(str::trim)
        .filter(|id| !id.is_empty() && *id != NEW_ENTITY_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_id_treats_sentinels_as_new() {
        assert_eq!(persisted_id(None), None);
        assert_eq!(persisted_id(Some("")), None);
        assert_eq!(persisted_id(Some("  ")), None);
        assert_eq!(persisted_id(Some("0")), None);
        assert_eq!(persisted_id(Some("abc")), Some("abc"));
    }
}
