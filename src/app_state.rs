use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoUserRepository, QuizRepository, UserRepository},
    services::{AccountService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub quiz_service: Arc<QuizService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let state = Self::from_repositories(config, user_repository, quiz_repository);

        if state.config.seed_demo_quiz {
            state.quiz_service.seed_demo_quiz().await?;
        }

        Ok(state)
    }

    /// Wires services over already-built repositories.
    pub fn from_repositories(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(&config));

        Self {
            account_service: Arc::new(AccountService::new(user_repository, jwt_service.clone())),
            quiz_service: Arc::new(QuizService::new(quiz_repository)),
            jwt_service,
            config: Arc::new(config),
        }
    }
}
