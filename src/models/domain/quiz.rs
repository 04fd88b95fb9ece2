use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{AnswerOption, Question};
use crate::models::domain::{new_id, persisted_id};
use crate::models::dto::request::{
    AnswerOptionInput, CreateQuizRequest, QuestionInput, UpdateQuizRequest,
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Option<String>, // None for seeded quizzes nobody owns
    pub is_public: bool,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl Quiz {
    pub fn from_request(request: CreateQuizRequest, owner_id: &str) -> Self {
        let id = new_id();
        let now = Utc::now();
        let questions = request
            .questions
            .into_iter()
            .map(|q| Question::from_input(&id, q))
            .collect();

        Quiz {
            id,
            title: request.title.trim().to_string(),
            description: none_if_blank(request.description),
            user_id: Some(owner_id.to_string()),
            is_public: request.is_public,
            questions,
            created_at: now,
            last_used_at: now,
        }
    }

    /// Public sample quiz inserted into an empty store.
    pub fn demo() -> Self {
        let id = new_id();
        let now = Utc::now();
        let question_id = new_id();

        Quiz {
            id: id.clone(),
            title: "Demo Quiz".to_string(),
            description: Some("A sample quiz to test functionality.".to_string()),
            user_id: None,
            is_public: true,
            questions: vec![Question {
                id: question_id.clone(),
                quiz_id: id,
                text: "What is 2 + 2?".to_string(),
                points: 1,
                options: vec![
                    AnswerOption::new(&question_id, "3", false),
                    AnswerOption::new(&question_id, "4", true),
                    AnswerOption::new(&question_id, "5", false),
                ],
            }],
            created_at: now,
            last_used_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }

    pub fn total_points(&self) -> i32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Independent copy owned by `owner_id`, titled "<title> Copy".
    pub fn duplicate_for(&self, owner_id: &str) -> Quiz {
        let id = new_id();
        let now = Utc::now();
        let questions = self
            .questions
            .iter()
            .map(|q| q.duplicate_into(&id))
            .collect();

        Quiz {
            id,
            title: format!("{} Copy", self.title),
            description: self.description.clone(),
            user_id: Some(owner_id.to_string()),
            is_public: false,
            questions,
            created_at: now,
            last_used_at: now,
        }
    }

    /// Converges this quiz onto the full replacement in `request`.
    ///
    /// Questions and options keep their ids when the request refers to them,
    /// get fresh ids when the request carries the new-entity sentinel, and are
    /// dropped when the request leaves them out. An id that names nothing in
    /// this quiz is rejected and leaves `self` untouched.
    pub fn apply_update(&mut self, request: UpdateQuizRequest) -> AppResult<()> {
        let questions = reconcile_questions(&self.id, &self.questions, request.questions)?;

        self.title = request.title.trim().to_string();
        self.description = none_if_blank(request.description);
        self.is_public = request.is_public;
        self.questions = questions;
        Ok(())
    }
}

fn reconcile_questions(
    quiz_id: &str,
    stored: &[Question],
    incoming: Vec<QuestionInput>,
) -> AppResult<Vec<Question>> {
    let by_id: HashMap<&str, &Question> = stored.iter().map(|q| (q.id.as_str(), q)).collect();
    let mut seen = HashSet::new();
    let mut reconciled = Vec::with_capacity(incoming.len());

    for input in incoming {
        let Some(id) = persisted_id(input.id.as_deref()).map(str::to_owned) else {
            reconciled.push(Question::from_input(quiz_id, input));
            continue;
        };

        let existing = by_id.get(id.as_str()).ok_or_else(|| {
            AppError::ValidationError(format!("Question '{}' does not belong to this quiz", id))
        })?;
        if !seen.insert(id.clone()) {
            return Err(AppError::ValidationError(format!(
                "Question '{}' appears more than once",
                id
            )));
        }

        reconciled.push(Question {
            id: existing.id.clone(),
            quiz_id: quiz_id.to_string(),
            text: input.text.trim().to_string(),
            points: input.points,
            options: reconcile_options(existing, input.options)?,
        });
    }

    Ok(reconciled)
}

fn reconcile_options(
    question: &Question,
    incoming: Vec<AnswerOptionInput>,
) -> AppResult<Vec<AnswerOption>> {
    let mut seen = HashSet::new();
    let mut reconciled = Vec::with_capacity(incoming.len());

    for input in incoming {
        let Some(id) = persisted_id(input.id.as_deref()).map(str::to_owned) else {
            reconciled.push(AnswerOption::from_input(&question.id, input));
            continue;
        };

        if !question.has_option(&id) {
            return Err(AppError::ValidationError(format!(
                "Option '{}' does not belong to question '{}'",
                id, question.id
            )));
        }
        if !seen.insert(id.clone()) {
            return Err(AppError::ValidationError(format!(
                "Option '{}' appears more than once",
                id
            )));
        }

        reconciled.push(AnswerOption {
            id,
            question_id: question.id.clone(),
            text: input.text.trim().to_string(),
            is_correct: input.is_correct,
        });
    }

    Ok(reconciled)
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
