use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{AnswerOption, Question, Quiz};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: String,
    pub username: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    pub quiz_id: String,
    pub text: String,
    pub points: i32,
    pub options: Vec<AnswerOptionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOptionDto {
    pub id: String,
    pub question_id: String,
    pub text: String,
    pub is_correct: bool,
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDto {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            user_id: quiz.user_id,
            is_public: quiz.is_public,
            created_at: quiz.created_at,
            last_used_at: quiz.last_used_at,
            questions: quiz.questions.into_iter().map(QuestionDto::from).collect(),
        }
    }
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: question.id,
            quiz_id: question.quiz_id,
            text: question.text,
            points: question.points,
            options: question
                .options
                .into_iter()
                .map(AnswerOptionDto::from)
                .collect(),
        }
    }
}

impl From<AnswerOption> for AnswerOptionDto {
    fn from(option: AnswerOption) -> Self {
        AnswerOptionDto {
            id: option.id,
            question_id: option.question_id,
            text: option.text,
            is_correct: option.is_correct,
        }
    }
}

/// A quiz as shown to someone taking it: correctness flags stay on the server.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizForTaking {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<QuestionForTaking>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionForTaking {
    pub id: String,
    pub text: String,
    pub points: i32,
    pub options: Vec<OptionForTaking>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct OptionForTaking {
    pub id: String,
    pub text: String,
}

impl From<Quiz> for QuizForTaking {
    fn from(quiz: Quiz) -> Self {
        QuizForTaking {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            questions: quiz
                .questions
                .into_iter()
                .map(|q| QuestionForTaking {
                    id: q.id,
                    text: q.text,
                    points: q.points,
                    options: q
                        .options
                        .into_iter()
                        .map(|o| OptionForTaking {
                            id: o.id,
                            text: o.text,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub quiz_id: String,
    pub score: i32,
    pub total: i32,
    pub correct_count: i32,
    pub question_count: i32,
    pub results: Vec<QuestionResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    pub correct: bool,
    pub points_awarded: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_dto_serializes_camel_case() {
        let dto = QuizDto::from(Quiz::demo());
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["title"], "Demo Quiz");
        assert_eq!(json["isPublic"], true);
        assert!(json["userId"].is_null());
        assert!(json["questions"][0]["options"][1]["isCorrect"].as_bool().unwrap());
    }

    #[test]
    fn test_quiz_for_taking_hides_correctness() {
        let quiz = Quiz::demo();
        let taking = QuizForTaking::from(quiz.clone());
        let json = serde_json::to_string(&taking).unwrap();

        assert!(!json.contains("isCorrect"));
        assert_eq!(taking.questions[0].options.len(), quiz.questions[0].options.len());
    }

    #[test]
    fn test_auth_response_field_names() {
        let response = AuthResponse {
            user_id: "u-1".to_string(),
            username: "alice".to_string(),
            token: "a.b.c".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["username"], "alice");
        assert_eq!(json["token"], "a.b.c");
    }
}
