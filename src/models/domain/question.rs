use serde::{Deserialize, Serialize};

use crate::models::domain::new_id;
use crate::models::dto::request::{AnswerOptionInput, QuestionInput};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub text: String,
    pub points: i32,
    pub options: Vec<AnswerOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerOption {
    pub id: String,
    pub question_id: String,
    pub text: String,
    pub is_correct: bool,
}

impl Question {
    /// Builds a brand new question; any ids carried by the input are ignored.
    pub fn from_input(quiz_id: &str, input: QuestionInput) -> Self {
        let id = new_id();
        let options = input
            .options
            .into_iter()
            .map(|option| AnswerOption::from_input(&id, option))
            .collect();

        Question {
            id,
            quiz_id: quiz_id.to_string(),
            text: input.text.trim().to_string(),
            points: input.points,
            options,
        }
    }

    /// Deep copy under a new quiz with fresh ids throughout.
    pub fn duplicate_into(&self, quiz_id: &str) -> Self {
        let id = new_id();
        let options = self
            .options
            .iter()
            .map(|option| AnswerOption::new(&id, &option.text, option.is_correct))
            .collect();

        Question {
            id,
            quiz_id: quiz_id.to_string(),
            text: self.text.clone(),
            points: self.points,
            options,
        }
    }

    pub fn correct_option_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.id.as_str())
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }
}

impl AnswerOption {
    pub fn new(question_id: &str, text: &str, is_correct: bool) -> Self {
        AnswerOption {
            id: new_id(),
            question_id: question_id.to_string(),
            text: text.to_string(),
            is_correct,
        }
    }

    pub fn from_input(question_id: &str, input: AnswerOptionInput) -> Self {
        AnswerOption {
            id: new_id(),
            question_id: question_id.to_string(),
            text: input.text.trim().to_string(),
            is_correct: input.is_correct,
        }
    }
}
