use async_graphql::{Context, ErrorExtensions, Result};

use crate::{
    app_state::AppState,
    auth::{require_claims_from_context, Claims},
    errors::AppResult,
};

pub fn state<'a>(ctx: &Context<'a>) -> Result<&'a AppState> {
    ctx.data::<AppState>()
}

/// Converts a service result, carrying the error code as an extension.
pub fn resolve<T>(result: AppResult<T>) -> Result<T> {
    result.map_err(|e| e.extend())
}

pub fn require_claims(ctx: &Context<'_>) -> Result<Claims> {
    resolve(require_claims_from_context(ctx))
}
