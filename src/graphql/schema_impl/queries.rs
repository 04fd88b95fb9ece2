use async_graphql::{Context, Object, Result, ID};

use crate::{
    graphql::helpers::{require_claims, resolve, state},
    models::dto::response::{QuizDto, QuizForTaking},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Full quiz including correctness flags. Readable by anyone, like the REST route.
    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> Result<QuizDto> {
        let quiz = resolve(state(ctx)?.quiz_service.get_quiz(&id).await)?;
        Ok(quiz.into())
    }

    async fn public_quizzes(&self, ctx: &Context<'_>) -> Result<Vec<QuizDto>> {
        let quizzes = resolve(state(ctx)?.quiz_service.list_public().await)?;
        Ok(quizzes.into_iter().map(QuizDto::from).collect())
    }

    async fn my_quizzes(&self, ctx: &Context<'_>) -> Result<Vec<QuizDto>> {
        let claims = require_claims(ctx)?;
        let quizzes = resolve(
            state(ctx)?
                .quiz_service
                .list_for_user(claims.user_id())
                .await,
        )?;
        Ok(quizzes.into_iter().map(QuizDto::from).collect())
    }

    async fn take_quiz(&self, ctx: &Context<'_>, id: ID) -> Result<QuizForTaking> {
        resolve(state(ctx)?.quiz_service.get_for_taking(&id).await)
    }
}
