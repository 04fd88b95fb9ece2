use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::Header as _, web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};

use crate::{
    app_state::AppState,
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Extractor for handlers that need a signed-in caller. Wrap it in `Option`
/// for routes that also serve anonymous callers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        self.0.user_id()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> AppResult<AuthenticatedUser> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

    let header = Authorization::<Bearer>::parse(req).map_err(|_| {
        AppError::Unauthorized("Missing or malformed bearer token".to_string())
    })?;

    let claims = state
        .jwt_service
        .validate_token(header.into_scheme().token())?;

    Ok(AuthenticatedUser(claims))
}
