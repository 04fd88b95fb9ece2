use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    auth::require_quiz_owner,
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{
            request::{CreateQuizRequest, SubmitQuizRequest, UpdateQuizRequest},
            response::{QuizForTaking, QuizResult},
        },
    },
    repositories::QuizRepository,
    services::grading::grade_submission,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok(quiz)
    }

    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn list_public(&self) -> AppResult<Vec<Quiz>> {
        self.repository.list_public().await
    }

    pub async fn get_public(&self, id: &str) -> AppResult<Quiz> {
        let quiz = self.get_quiz(id).await?;
        if !quiz.is_public {
            return Err(AppError::Forbidden("This quiz is not public".to_string()));
        }
        Ok(quiz)
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest, owner_id: &str) -> AppResult<Quiz> {
        request.validate()?;

        let quiz = self
            .repository
            .create(Quiz::from_request(request, owner_id))
            .await?;

        log::info!("Quiz {} created by user {}", quiz.id, owner_id);
        Ok(quiz)
    }

    /// Replaces the stored quiz `id` with `request`, reconciling children by id.
    pub async fn update_quiz(
        &self,
        id: &str,
        request: UpdateQuizRequest,
        user_id: &str,
    ) -> AppResult<()> {
        if request.id != id {
            return Err(AppError::ValidationError(
                "Quiz id in the body does not match the path".to_string(),
            ));
        }
        request.validate()?;

        let mut quiz = self.get_quiz(id).await?;
        if let Err(err) = require_quiz_owner(user_id, &quiz) {
            log::warn!("User {} tried to update quiz {} they do not own", user_id, id);
            return Err(err);
        }

        quiz.apply_update(request)?;

        if !self.repository.replace(&quiz).await? {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        log::info!("Quiz {} updated by user {}", id, user_id);
        Ok(())
    }

    pub async fn delete_quiz(&self, id: &str, user_id: &str) -> AppResult<()> {
        let quiz = self.get_quiz(id).await?;
        if let Err(err) = require_quiz_owner(user_id, &quiz) {
            log::warn!("User {} tried to delete quiz {} they do not own", user_id, id);
            return Err(err);
        }

        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        log::info!("Quiz {} deleted by user {}", id, user_id);
        Ok(())
    }

    /// Any caller may copy any quiz they can read; the copy is theirs.
    pub async fn duplicate_quiz(&self, id: &str, user_id: &str) -> AppResult<Quiz> {
        let source = self.get_quiz(id).await?;
        let copy = self.repository.create(source.duplicate_for(user_id)).await?;

        log::info!("Quiz {} duplicated as {} for user {}", id, copy.id, user_id);
        Ok(copy)
    }

    pub async fn get_for_taking(&self, id: &str) -> AppResult<QuizForTaking> {
        let quiz = self.get_quiz(id).await?;
        self.repository.touch_last_used(&quiz.id, Utc::now()).await?;
        Ok(QuizForTaking::from(quiz))
    }

    pub async fn submit(&self, request: SubmitQuizRequest) -> AppResult<QuizResult> {
        request.validate()?;

        let quiz = self.get_quiz(&request.quiz_id).await?;
        let result = grade_submission(&quiz, &request.selected_answers);
        self.repository.touch_last_used(&quiz.id, Utc::now()).await?;

        log::info!(
            "Quiz {} graded: {}/{} points",
            quiz.id,
            result.score,
            result.total
        );
        Ok(result)
    }

    /// Inserts the demo quiz when the store holds no quizzes at all.
    pub async fn seed_demo_quiz(&self) -> AppResult<Option<Quiz>> {
        if self.repository.count().await? > 0 {
            return Ok(None);
        }

        let quiz = self.repository.create(Quiz::demo()).await?;
        log::info!("Seeded demo quiz {}", quiz.id);
        Ok(Some(quiz))
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.health_check().await
    }
}
