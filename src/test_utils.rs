pub mod fixtures {
    use std::sync::Arc;

    use crate::{
        app_state::AppState,
        auth::password,
        config::Config,
        models::domain::{Quiz, User},
        models::dto::request::{AnswerOptionInput, CreateQuizRequest, QuestionInput},
        repositories::{MockQuizRepository, MockUserRepository},
    };

    /// State over mocks with no expectations; any repository call panics.
    pub fn app_state_with_mocks(config: Config) -> AppState {
        AppState::from_repositories(
            config,
            Arc::new(MockUserRepository::new()),
            Arc::new(MockQuizRepository::new()),
        )
    }

    /// Creates a standard test user whose password is "Secret123"
    pub fn test_user() -> User {
        test_user_with_username("testuser")
    }

    pub fn test_user_with_username(username: &str) -> User {
        User::new(
            username,
            &format!("{}@example.com", username),
            password::hash_password("Secret123").unwrap(),
        )
    }

    /// Single-question quiz owned by `owner_id`: "Pick A" with A correct, B and C wrong.
    pub fn test_quiz(owner_id: &str) -> Quiz {
        Quiz::from_request(
            CreateQuizRequest {
                title: "Letters".to_string(),
                description: None,
                is_public: false,
                questions: vec![QuestionInput {
                    id: None,
                    text: "Pick A".to_string(),
                    points: 1,
                    options: ["A", "B", "C"]
                        .into_iter()
                        .map(|text| AnswerOptionInput {
                            id: None,
                            text: text.to_string(),
                            is_correct: text == "A",
                        })
                        .collect(),
                }],
            },
            owner_id,
        )
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_user() {
        let user = test_user();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "testuser@example.com");
    }

    #[test]
    fn test_fixtures_test_quiz() {
        let quiz = test_quiz("owner");
        assert!(quiz.is_owned_by("owner"));
        assert_eq!(quiz.questions[0].correct_option_ids().count(), 1);
    }
}
