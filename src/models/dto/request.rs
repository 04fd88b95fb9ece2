use std::borrow::Cow;

use async_graphql::InputObject;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

static USERNAME_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9_]+$").expect("USERNAME_REGEX is a valid regex pattern")
});
static UPPERCASE_REGEX: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"[A-Z]").expect("UPPERCASE_REGEX is a valid regex pattern"));
static DIGIT_REGEX: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"[0-9]").expect("DIGIT_REGEX is a valid regex pattern"));

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(
        length(min = 8, message = "Password must be at least 8 characters long"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionInput>,
}

/// Full replacement of a stored quiz. Children whose id is absent, empty or
/// "0" are created; the rest must already belong to the quiz.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_question_options"))]
pub struct QuestionInput {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,

    #[validate(
        length(min = 1, max = 300, message = "Question text must be between 1 and 300 characters"),
        custom(function = "validate_not_blank")
    )]
    pub text: String,

    #[serde(default = "default_points")]
    #[validate(range(min = 0, max = 100, message = "Points must be between 0 and 100"))]
    pub points: i32,

    #[serde(default)]
    #[validate(nested)]
    pub options: Vec<AnswerOptionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOptionInput {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,

    #[validate(
        length(min = 1, max = 300, message = "Option text must be between 1 and 300 characters"),
        custom(function = "validate_not_blank")
    )]
    pub text: String,

    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[serde(deserialize_with = "deserialize_id")]
    #[validate(length(min = 1, message = "Quiz id is required"))]
    pub quiz_id: String,

    #[serde(default, deserialize_with = "deserialize_ids")]
    pub selected_answers: Vec<String>,
}

fn default_points() -> i32 {
    1
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username_format").with_message(Cow::Borrowed(
            "Username may only contain letters, digits and underscores",
        )))
    }
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let mut problems = Vec::new();
    if !UPPERCASE_REGEX.is_match(password) {
        problems.push("Password must contain at least one uppercase letter");
    }
    if !DIGIT_REGEX.is_match(password) {
        problems.push("Password must contain at least one number");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength")
            .with_message(Cow::Owned(problems.join(", "))))
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message(Cow::Borrowed("Must not be blank")))
    } else {
        Ok(())
    }
}

fn validate_question_options(question: &QuestionInput) -> Result<(), ValidationError> {
    if question.options.is_empty() {
        return Err(ValidationError::new("options_required")
            .with_message(Cow::Borrowed("A question needs at least one option")));
    }
    if !question.options.iter().any(|o| o.is_correct) {
        return Err(ValidationError::new("correct_option_required")
            .with_message(Cow::Borrowed("A question needs at least one correct option")));
    }
    Ok(())
}

/// Ids arrive either as strings or, from older clients, as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn deserialize_optional_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(d)?.map(String::from))
}

fn deserialize_ids<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Vec::<RawId>::deserialize(d)?
        .into_iter()
        .map(String::from)
        .collect())
}

fn deserialize_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    deserialize_optional_id(d)?.ok_or_else(|| serde::de::Error::custom("id must not be null"))
}
