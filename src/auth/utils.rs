use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

pub fn require_quiz_owner(user_id: &str, quiz: &Quiz) -> AppResult<()> {
    if !quiz.is_owned_by(user_id) {
        return Err(AppError::Forbidden(
            "You can only modify your own quizzes".to_string(),
        ));
    }
    Ok(())
}

pub fn claims_from_context(ctx: &Context<'_>) -> Option<Claims> {
    ctx.data_opt::<Claims>().cloned()
}

pub fn require_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    claims_from_context(ctx)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}
