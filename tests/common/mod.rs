#![allow(dead_code, unused_macros)]

use std::{collections::HashMap, sync::Arc};

use actix_web::test::TestRequest;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use factify_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Quiz, User},
    repositories::{QuizRepository, UserRepository},
};

/// Builds an actix test service over `configure_app`.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(factify_server::middleware::RequestIdMiddleware)
                .configure(factify_server::handlers::configure_app($state)),
        )
    };
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        let duplicate = users
            .values()
            .any(|u| u.id == user.id || u.email == user.email || u.username == user.username);
        if duplicate {
            return Err(AppError::AlreadyExists(
                "Email or username already registered".to_string(),
            ));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
    writes: RwLock<usize>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create/replace/delete calls that reached the store.
    pub async fn write_count(&self) -> usize {
        *self.writes.read().await
    }

    pub async fn get(&self, id: &str) -> Option<Quiz> {
        self.quizzes.read().await.get(id).cloned()
    }

    async fn record_write(&self) {
        *self.writes.write().await += 1;
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes
            .values()
            .filter(|q| q.is_owned_by(user_id))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn list_public(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes.values().filter(|q| q.is_public).cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.quizzes.read().await.len() as u64)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        drop(quizzes);

        self.record_write().await;
        Ok(quiz)
    }

    async fn replace(&self, quiz: &Quiz) -> AppResult<bool> {
        let mut quizzes = self.quizzes.write().await;
        let Some(stored) = quizzes.get_mut(&quiz.id) else {
            return Ok(false);
        };
        *stored = quiz.clone();
        drop(quizzes);

        self.record_write().await;
        Ok(true)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let removed = self.quizzes.write().await.remove(id).is_some();
        if removed {
            self.record_write().await;
        }
        Ok(removed)
    }

    async fn touch_last_used(&self, id: &str, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(quiz) = self.quizzes.write().await.get_mut(id) {
            quiz.last_used_at = at;
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
}

pub fn test_context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let quizzes = Arc::new(InMemoryQuizRepository::new());
    let state = AppState::from_repositories(Config::test_config(), users.clone(), quizzes.clone());

    TestContext {
        state,
        users,
        quizzes,
    }
}

pub fn register_request(username: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/account/register")
        .set_json(serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "Secret123"
        }))
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/account/login")
        .set_json(serde_json::json!({ "email": email, "password": password }))
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// One question, "Pick A", where only A is correct.
pub fn letters_quiz_body() -> serde_json::Value {
    serde_json::json!({
        "title": "Letters",
        "description": "Pick the right letter",
        "isPublic": false,
        "questions": [{
            "id": 0,
            "text": "Pick A",
            "points": 1,
            "options": [
                { "id": 0, "text": "A", "isCorrect": true },
                { "id": 0, "text": "B", "isCorrect": false },
                { "id": 0, "text": "C", "isCorrect": false }
            ]
        }]
    })
}
