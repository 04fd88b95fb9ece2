use async_graphql::{Context, Object, Result, ID};

use crate::{
    graphql::helpers::{require_claims, resolve, state},
    models::dto::{
        request::SubmitQuizRequest,
        response::{QuizDto, QuizResult},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn submit_quiz(&self, ctx: &Context<'_>, input: SubmitQuizRequest) -> Result<QuizResult> {
        resolve(state(ctx)?.quiz_service.submit(input).await)
    }

    async fn duplicate_quiz(&self, ctx: &Context<'_>, id: ID) -> Result<QuizDto> {
        let claims = require_claims(ctx)?;
        let copy = resolve(
            state(ctx)?
                .quiz_service
                .duplicate_quiz(&id, claims.user_id())
                .await,
        )?;
        Ok(copy.into())
    }
}
